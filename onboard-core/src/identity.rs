//! Identity extraction from lifecycle-event targets

use crate::event::Target;

/// Group display names encode the client id after the first delimiter,
/// e.g. `EXT-acme`.
const GROUP_NAME_DELIMITER: char = '-';

const USER_TARGET: &str = "User";
const GROUP_TARGET: &str = "UserGroup";

/// Identity fields derived from the target list of one event.
///
/// Fields without a matching target keep their defaults; callers proceed
/// with those defaults rather than rejecting the event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedIdentity {
    pub client_id: String,
    pub client_name: String,
    pub user_email: String,
    pub user_name: String,
    pub is_admin: bool,
}

impl ExtractedIdentity {
    /// Derive identity fields from the ordered target list of one event.
    ///
    /// Single pass, no short-circuit: when several targets share a type,
    /// the last one wins. A `User` target supplies the member's email and
    /// display name and sets the admin flag unconditionally; a
    /// `UserGroup` target supplies both client id and client name from
    /// the second delimiter-separated segment of the group's display
    /// name. Targets of any other type are ignored. A group name without
    /// a second segment leaves the client fields untouched.
    pub fn from_targets(targets: &[Target]) -> Self {
        let mut identity = Self::default();

        for target in targets {
            match target.target_type.as_str() {
                USER_TARGET => {
                    identity.user_email = target.alternate_id.clone();
                    identity.user_name = target.display_name.clone();
                    identity.is_admin = true;
                }
                GROUP_TARGET => {
                    if let Some(segment) =
                        target.display_name.split(GROUP_NAME_DELIMITER).nth(1)
                    {
                        identity.client_id = segment.to_string();
                        identity.client_name = segment.to_string();
                    }
                }
                _ => {}
            }
        }

        identity
    }
}
