//! Portal user directory shown in the admin panel.

use nexus_portal_core::UserRole;

/// A row of the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: &'static str,
    pub email: &'static str,
    pub role: UserRole,
    pub last_seen: &'static str,
}

/// Known portal accounts.
pub const USER_DIRECTORY: [DirectoryEntry; 4] = [
    DirectoryEntry {
        name: "Admin User",
        email: "admin@nexus.io",
        role: UserRole::Admin,
        last_seen: "Just now",
    },
    DirectoryEntry {
        name: "John Doe",
        email: "john@nexus.io",
        role: UserRole::User,
        last_seen: "2 hours ago",
    },
    DirectoryEntry {
        name: "Jane Smith",
        email: "jane@nexus.io",
        role: UserRole::User,
        last_seen: "1 day ago",
    },
    DirectoryEntry {
        name: "Bob Wilson",
        email: "bob@nexus.io",
        role: UserRole::User,
        last_seen: "5 days ago",
    },
];

/// Headline card on the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemStat {
    pub label: &'static str,
    pub value: &'static str,
    /// Tailwind text class for the value.
    pub tone: &'static str,
}

pub const SYSTEM_STATS: [SystemStat; 3] = [
    SystemStat {
        label: "Total Users",
        value: "124",
        tone: "text-gray-900",
    },
    SystemStat {
        label: "System Security",
        value: "Optimal",
        tone: "text-green-600",
    },
    SystemStat {
        label: "API Requests",
        value: "12k / hr",
        tone: "text-gray-900",
    },
];
