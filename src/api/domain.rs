//! API domains and their URL prefixes

use std::fmt;

/// The API areas reachable through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiDomain {
    Notifications,
    EditPage,
    Menu,
    Welcome,
    Auth,
    Checkout,
    Inventory,
    Utilities,
    Reports,
}

impl ApiDomain {
    /// All domains in dispatch order.
    pub const ALL: [Self; 9] = [
        Self::Notifications,
        Self::EditPage,
        Self::Menu,
        Self::Welcome,
        Self::Auth,
        Self::Checkout,
        Self::Inventory,
        Self::Utilities,
        Self::Reports,
    ];

    /// Literal URL prefix routed to this domain.
    ///
    /// `/api/menu/` carries a trailing slash: `/api/menu` alone is not an API
    /// request and falls through to the front-end.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Notifications => "/api/staff/notifications",
            Self::EditPage => "/api/editpage",
            Self::Menu => "/api/menu/",
            Self::Welcome => "/api/welcome",
            Self::Auth => "/api/auth",
            Self::Checkout => "/api/checkout",
            Self::Inventory => "/api/inventory",
            Self::Utilities => "/api/utilities",
            Self::Reports => "/api/reports",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::EditPage => "editpage",
            Self::Menu => "menu",
            Self::Welcome => "welcome",
            Self::Auth => "auth",
            Self::Checkout => "checkout",
            Self::Inventory => "inventory",
            Self::Utilities => "utilities",
            Self::Reports => "reports",
        }
    }
}

impl fmt::Display for ApiDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
