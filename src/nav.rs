use serde::Serialize;

use crate::models::users::{ROLE_ADMIN, ROLE_PATIENT, ROLE_STAFF};

#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct NavEntry {
    pub label: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
}

const fn entry(label: &'static str, icon: &'static str, path: &'static str) -> NavEntry {
    NavEntry { label, icon, path }
}

const DASHBOARD: NavEntry = entry("Dashboard", "dashboard", "/dashboard");
const APPOINTMENTS: NavEntry = entry("Appointments", "calendar", "/appointments");
const CASE_HISTORY: NavEntry = entry("Case History", "folder", "/case-histories");
const INVITE: NavEntry = entry("Invite", "mail", "/invite");
const DOCTORS: NavEntry = entry("Doctors", "stethoscope", "/doctors");
const USERS: NavEntry = entry("Users", "people", "/users");
const ROOM: NavEntry = entry("Room", "bed", "/rooms");

/// Ordered navigation entries for a role. Unknown or empty roles fall
/// back to the base set, so a garbled token still renders a minimal
/// shell instead of an empty screen.
pub fn build_nav(role: &str) -> Vec<NavEntry> {
    let mut entries = vec![DASHBOARD, APPOINTMENTS, CASE_HISTORY];
    match role {
        ROLE_ADMIN | ROLE_STAFF => {
            entries.extend([INVITE, DOCTORS, USERS, ROOM].iter().cloned());
        }
        ROLE_PATIENT => entries.push(DOCTORS),
        _ => {}
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: &str) -> Vec<&'static str> {
        build_nav(role).into_iter().map(|e| e.label).collect()
    }

    #[test]
    fn admin_and_staff_get_management_entries_in_order() {
        let expected = vec![
            "Dashboard",
            "Appointments",
            "Case History",
            "Invite",
            "Doctors",
            "Users",
            "Room",
        ];
        assert_eq!(labels("admin"), expected);
        assert_eq!(labels("staff"), expected);
    }

    #[test]
    fn doctor_gets_exactly_the_base_entries() {
        assert_eq!(labels("doctor"), vec!["Dashboard", "Appointments", "Case History"]);
    }

    #[test]
    fn patient_additionally_sees_doctors() {
        assert_eq!(
            labels("patient"),
            vec!["Dashboard", "Appointments", "Case History", "Doctors"]
        );
    }

    #[test]
    fn unknown_role_falls_open_to_base_set() {
        assert_eq!(labels(""), labels("doctor"));
        assert_eq!(labels("superuser"), labels("doctor"));
    }
}
