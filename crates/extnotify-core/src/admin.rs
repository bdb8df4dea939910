//! Admin requests the notifier answers on behalf of the admin module.

use crate::ringtone::Ringtone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRequest<'a> {
    GetRingtone,
    SetRingtone(&'a str),
    /// Any admin message this module does not own.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminResponse {
    Ringtone(Ringtone),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminResult {
    NotHandled,
    Handled,
    HandledWithResponse(AdminResponse),
}
