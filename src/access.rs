// Role-based access rules for the portal
// Every view asks `can_access` instead of keeping its own role flags

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Receptionist,
    Customer,
    Guest,
}

impl Default for Role {
    fn default() -> Self {
        Role::Guest
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Home,
    Rooms,
    Bookings,
    Customers,
    Dashboard,
    Settings,
    ManageRooms,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Home,
        Resource::Rooms,
        Resource::Bookings,
        Resource::Customers,
        Resource::Dashboard,
        Resource::Settings,
        Resource::ManageRooms,
    ];
}

pub fn can_access(role: Role, resource: Resource) -> bool {
    use Resource::*;
    use Role::*;

    match resource {
        Home | Rooms => true,
        Bookings => matches!(role, Admin | Receptionist | Customer),
        Customers | Dashboard | ManageRooms => matches!(role, Admin | Receptionist),
        Settings => role == Admin,
    }
}

// Navigation entries a role gets to see, in menu order
pub fn visible_resources(role: Role) -> Vec<Resource> {
    Resource::ALL
        .into_iter()
        .filter(|resource| *resource != Resource::ManageRooms && can_access(role, *resource))
        .collect()
}

// How much of the reservation store a caller may read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationScope {
    All,
    Own,
    Nothing,
}

// Caller identity handed to `ReservationStore::list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleContext {
    pub role: Role,
    pub email: Option<String>,
}

impl RoleContext {
    pub fn new(role: Role, email: Option<&str>) -> Self {
        Self {
            role,
            email: email.map(str::to_string),
        }
    }

    pub fn admin() -> Self {
        Self::new(Role::Admin, None)
    }

    pub fn receptionist() -> Self {
        Self::new(Role::Receptionist, None)
    }

    pub fn customer(email: &str) -> Self {
        Self::new(Role::Customer, Some(email))
    }

    pub fn guest() -> Self {
        Self::new(Role::Guest, None)
    }

    pub fn scope(&self) -> ReservationScope {
        if !can_access(self.role, Resource::Bookings) {
            return ReservationScope::Nothing;
        }

        match self.role {
            Role::Customer => ReservationScope::Own,
            _ => ReservationScope::All,
        }
    }
}
