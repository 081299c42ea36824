use crate::core::ContentItem;

/// One observed state of the upstream item store.
///
/// Hosts subscribe to their store and forward every change through
/// `UpdateScheduler::notify_data`. `loading` and `error` are display gates:
/// the pipeline only rebuilds when the store is settled and error-free.
#[derive(Debug, Clone, Copy)]
pub struct StoreSnapshot<'a> {
    pub items: &'a [ContentItem],
    pub loading: bool,
    pub error: Option<&'a str>,
}

impl<'a> StoreSnapshot<'a> {
    #[must_use]
    pub fn ready(items: &'a [ContentItem]) -> Self {
        Self {
            items,
            loading: false,
            error: None,
        }
    }

    #[must_use]
    pub fn loading() -> Self {
        Self {
            items: &[],
            loading: true,
            error: None,
        }
    }

    #[must_use]
    pub fn errored(message: &'a str) -> Self {
        Self {
            items: &[],
            loading: false,
            error: Some(message),
        }
    }
}
