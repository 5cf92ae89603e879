//! Confirmation gate for destructive list actions.
//!
//! # Responsibility
//! - Describe the prompts shown before clearing items or deleting a category.
//! - Run the core operation only after the gate says yes.
//!
//! # Invariants
//! - A declined prompt leaves the list untouched.
//! - The core never waits on the gate; presentation code calls it first.

use crate::list::manager::ListManager;
use log::info;

/// Title/body pair shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
}

impl ConfirmPrompt {
    pub fn clear_completed() -> Self {
        Self {
            title: "Clear Checked Items".to_string(),
            message: "Are you sure?".to_string(),
        }
    }

    pub fn delete_category(label: &str) -> Self {
        Self {
            title: "Delete Category".to_string(),
            message: format!("Are you sure you want to delete the category \"{label}\"?"),
        }
    }
}

/// Yes/no capability supplied by the presentation layer.
pub trait ConfirmGate {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
}

impl<F> ConfirmGate for F
where
    F: FnMut(&ConfirmPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self(prompt)
    }
}

/// Gate that accepts every prompt (scripted/`--yes` flows).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmGate for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> bool {
        true
    }
}

/// Gate that declines every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmGate for NeverConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> bool {
        false
    }
}

/// Clears completed items if `gate` confirms.
///
/// Returns whether the clear ran (even if there was nothing to remove).
pub fn clear_completed_with(manager: &mut ListManager, gate: &mut dyn ConfirmGate) -> bool {
    if !gate.confirm(&ConfirmPrompt::clear_completed()) {
        info!("event=confirm module=list status=declined action=clear_completed");
        return false;
    }
    manager.clear_completed();
    true
}

/// Deletes `label` and its items if `gate` confirms.
pub fn delete_category_with(
    manager: &mut ListManager,
    gate: &mut dyn ConfirmGate,
    label: &str,
) -> bool {
    if !gate.confirm(&ConfirmPrompt::delete_category(label)) {
        info!("event=confirm module=list status=declined action=delete_category");
        return false;
    }
    manager.delete_category(label);
    true
}

#[cfg(test)]
mod tests {
    use super::ConfirmPrompt;

    #[test]
    fn delete_prompt_names_the_category() {
        let prompt = ConfirmPrompt::delete_category("Produce");
        assert_eq!(prompt.title, "Delete Category");
        assert!(prompt.message.contains("\"Produce\""));
    }
}
