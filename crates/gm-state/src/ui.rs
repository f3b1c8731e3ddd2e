//! UI preference container. Purely presentational, no backend state.

#[derive(Debug, Default)]
pub struct UiStore {
    is_sidebar_fold: bool,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sidebar_fold(&self) -> bool {
        self.is_sidebar_fold
    }

    pub fn set_sidebar_fold(&mut self, value: bool) {
        self.is_sidebar_fold = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_fold_toggles() {
        let mut store = UiStore::new();
        assert!(!store.is_sidebar_fold());

        store.set_sidebar_fold(true);
        assert!(store.is_sidebar_fold());

        store.set_sidebar_fold(false);
        assert!(!store.is_sidebar_fold());
    }
}
