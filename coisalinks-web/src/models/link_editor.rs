//! Edit-mode bookkeeping for the dashboard table.

use shared::models::{Link, LinkUpdateRequest};

/// Values typed into an edited row, not yet saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDraft {
    pub id: i64,
    pub original_url: String,
    pub shortened_url: String,
}

impl LinkDraft {
    pub fn from_link(link: &Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url.clone(),
            shortened_url: link.shortened_url.clone(),
        }
    }

    pub fn to_request(&self) -> LinkUpdateRequest {
        LinkUpdateRequest {
            original_url: self.original_url.clone(),
            shortened_url: self.shortened_url.clone(),
        }
    }
}

/// At most one row is in edit mode; starting another discards the first draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkEditor {
    draft: Option<LinkDraft>,
}

impl LinkEditor {
    pub fn draft(&self) -> Option<&LinkDraft> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.draft.as_ref().is_some_and(|draft| draft.id == id)
    }

    #[must_use]
    pub fn begin(&self, link: &Link) -> Self {
        Self {
            draft: Some(LinkDraft::from_link(link)),
        }
    }

    #[must_use]
    pub fn with_original_url(&self, value: String) -> Self {
        self.edit(|draft| draft.original_url = value)
    }

    #[must_use]
    pub fn with_shortened_url(&self, value: String) -> Self {
        self.edit(|draft| draft.shortened_url = value)
    }

    #[must_use]
    pub fn cancel(&self) -> Self {
        Self::default()
    }

    fn edit(&self, apply: impl FnOnce(&mut LinkDraft)) -> Self {
        let mut next = self.clone();
        if let Some(draft) = next.draft.as_mut() {
            apply(draft);
        }
        next
    }
}
