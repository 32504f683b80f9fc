//! Yes/no gate placed in front of destructive actions.

/// Asks the operator to approve an action. Returning `false` aborts it
/// before any request is sent.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
