use itertools::Itertools;

/// Zero or more node labels (or a single relationship type), always emitted unquoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Labels(Vec<String>);

impl Labels {
    pub fn none() -> Self {
        Labels(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn push(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !label.is_empty() {
            self.0.push(label);
        }
    }
}

impl From<&str> for Labels {
    fn from(label: &str) -> Self {
        let mut labels = Labels::none();
        labels.push(label);
        labels
    }
}

impl From<String> for Labels {
    fn from(label: String) -> Self {
        let mut labels = Labels::none();
        labels.push(label);
        labels
    }
}

impl<S: Into<String>> From<Vec<S>> for Labels {
    fn from(labels: Vec<S>) -> Self {
        labels.into_iter().collect()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Labels {
    fn from(labels: [S; N]) -> Self {
        labels.into_iter().collect()
    }
}

impl<S: Into<String>> From<Option<S>> for Labels {
    fn from(label: Option<S>) -> Self {
        label.into_iter().collect()
    }
}

impl From<()> for Labels {
    fn from(_: ()) -> Self {
        Labels::none()
    }
}

impl<S: Into<String>> FromIterator<S> for Labels {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut labels = Labels::none();
        for label in iter {
            labels.push(label);
        }
        labels
    }
}

/// Colon-prefixed label chain (`:A:B`), or the empty string when there are none.
pub fn serialize_labels(labels: impl Into<Labels>) -> String {
    let labels: Labels = labels.into();
    let chain = labels.iter().map(|label| format!(":{}", label)).join("");
    chain
}
