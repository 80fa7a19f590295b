//! Interactive configuration wizard
//!
//! The wizard is a plain state machine. A front-end renders the current
//! [`WizardState`], turns user input into [`WizardEvent`]s and feeds them
//! to [`WizardSession::handle`]; tests feed a scripted sequence through
//! [`WizardSession::run_script`].
//!
//! ```text
//! ChoosePreset ─► ReviewExtensions ─► EditExtensions (add | remove | done)
//!              ─► ReviewSettings   ─► EditSettings   (set | done)
//!              ─► Confirm ─► Applied | Aborted
//! ```

mod session;
mod value;

pub use session::{PresetChoice, WizardEvent, WizardSession, WizardState};
pub use value::{SettingValue, infer_setting_value};
