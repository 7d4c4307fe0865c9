//! User confirmation prompts for destructive operations

use dialoguer::Confirm;
use log::debug;

/// Ask before deleting a resource
///
/// Returns `true` when the deletion may proceed. `--yes` skips the prompt.
/// In batch mode without `--yes` the answer is always `false`.
pub fn confirm_delete(kind: &str, id: &str, yes: bool, batch_mode: bool) -> bool {
    if yes {
        return true;
    }
    if batch_mode {
        eprintln!(
            "Refusing to delete {} '{}' in batch mode without --yes",
            kind, id
        );
        return false;
    }

    match Confirm::new()
        .with_prompt(format!("Delete {} '{}'? This cannot be undone", kind, id))
        .default(false)
        .interact()
    {
        Ok(answer) => answer,
        Err(e) => {
            debug!("Confirmation prompt failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_delete_with_yes() {
        assert!(confirm_delete("deployment", "abc", true, false));
        assert!(confirm_delete("deployment", "abc", true, true));
    }

    #[test]
    fn test_confirm_delete_batch_mode_declines() {
        assert!(!confirm_delete("project", "prj_1", false, true));
    }
}
