// SPDX-License-Identifier: MPL-2.0
//! What the page does with a terms outcome.

use crate::domain::offer::Environment;

use super::TermsOutcome;

/// Page-level effect of a terms outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Leave the page for this URL.
    Navigate(String),
    /// Replace the block contents with this (unsanitized) markup.
    Render(String),
    /// Leave the page as it is.
    Nothing,
}

impl PageAction {
    /// Maps an outcome to a page action.
    ///
    /// A missing offer sends production visitors to the not-found page;
    /// stage pages stay empty so authors can see the block failed.
    #[must_use]
    pub fn for_outcome(outcome: TermsOutcome, env: Environment, not_found_path: &str) -> Self {
        match outcome {
            TermsOutcome::Redirect(url) => Self::Navigate(url),
            TermsOutcome::Html(html) => Self::Render(html),
            TermsOutcome::NotFound if env.is_stage() => Self::Nothing,
            TermsOutcome::NotFound => Self::Navigate(not_found_path.to_owned()),
        }
    }
}

/// The page hosting a terms block.
pub trait TermsHost {
    /// Hostname of the current page.
    fn hostname(&self) -> &str;

    /// Current markup of the block, kept inside the rendered container.
    fn inner_html(&self) -> String;

    fn navigate(&mut self, url: &str);

    /// Strips anything unsafe from markup before it is inserted.
    fn sanitize(&self, html: &str) -> String;

    /// Replaces the block contents with sanitized markup.
    fn replace_children(&mut self, html: String);
}

/// Performs an action on the host.
pub fn apply_action<H: TermsHost>(action: &PageAction, host: &mut H) {
    match action {
        PageAction::Navigate(url) => host.navigate(url),
        PageAction::Render(html) => {
            let clean = host.sanitize(html);
            host.replace_children(clean);
        }
        PageAction::Nothing => {}
    }
}
