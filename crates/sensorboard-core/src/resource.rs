//! Remote resources exposed by the backend API

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Sensors,
    Income,
    Expense,
    Reports,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Sensors,
        Resource::Income,
        Resource::Expense,
        Resource::Reports,
    ];

    /// Path segment on the remote API
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Sensors => "dht-sensors",
            Resource::Income => "income",
            Resource::Expense => "expense",
            Resource::Reports => "reports",
        }
    }

    /// Name of the identifier field carried by delete and update calls
    pub fn id_field(&self) -> &'static str {
        match self {
            Resource::Sensors => "dhtSensorId",
            Resource::Income => "incomeId",
            Resource::Expense => "expenseId",
            Resource::Reports => "reportId",
        }
    }

    /// Dashboard route serving this resource's list page
    pub fn route(&self) -> &'static str {
        match self {
            Resource::Sensors => "/data-sensors",
            Resource::Income => "/income",
            Resource::Expense => "/expenses",
            Resource::Reports => "/reports",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
