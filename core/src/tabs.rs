//! Tab switching across the four entity panels.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::client::ApiClient;
use crate::controller::{EntityController, Panel};
use crate::entity::{Client, Employee, Pet, Product};
use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Clients,
    Employees,
    Pets,
    Products,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Clients, Tab::Employees, Tab::Pets, Tab::Products];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Clients => "Clientes",
            Tab::Employees => "Funcionarios",
            Tab::Pets => "Pets",
            Tab::Products => "Produtos",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("aba desconhecida: {0}")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clientes" | "cliente" | "clients" | "client" => Ok(Tab::Clients),
            "funcionarios" | "funcionario" | "employees" | "employee" => Ok(Tab::Employees),
            "pets" | "pet" => Ok(Tab::Pets),
            "produtos" | "produto" | "products" | "product" => Ok(Tab::Products),
            other => Err(UnknownTab(other.to_string())),
        }
    }
}

/// The whole admin screen: one controller per entity and the visible tab.
pub struct AdminPanel {
    api: ApiClient,
    active: Tab,
    clients: EntityController<Client>,
    employees: EntityController<Employee>,
    pets: EntityController<Pet>,
    products: EntityController<Product>,
}

impl AdminPanel {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            active: Tab::Clients,
            clients: EntityController::new(api.clone(), notifier.clone()),
            employees: EntityController::new(api.clone(), notifier.clone()),
            pets: EntityController::new(api.clone(), notifier.clone()),
            products: EntityController::new(api.clone(), notifier),
            api,
        }
    }

    /// Client shared by every panel, for lookups outside the four lists.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Load every entity list, as on first page display.
    pub fn init(&mut self) {
        for tab in Tab::ALL {
            self.panel_mut(tab).load();
        }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Change the visible panel. No data is fetched.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn panel(&self, tab: Tab) -> &dyn Panel {
        match tab {
            Tab::Clients => &self.clients,
            Tab::Employees => &self.employees,
            Tab::Pets => &self.pets,
            Tab::Products => &self.products,
        }
    }

    pub fn panel_mut(&mut self, tab: Tab) -> &mut dyn Panel {
        match tab {
            Tab::Clients => &mut self.clients,
            Tab::Employees => &mut self.employees,
            Tab::Pets => &mut self.pets,
            Tab::Products => &mut self.products,
        }
    }

    pub fn active_panel(&self) -> &dyn Panel {
        self.panel(self.active)
    }

    pub fn active_panel_mut(&mut self) -> &mut dyn Panel {
        self.panel_mut(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::notify::MemoryNotifier;

    #[test]
    fn tabs_parse_from_resource_and_english_names() {
        assert_eq!("clientes".parse::<Tab>(), Ok(Tab::Clients));
        assert_eq!("Employees".parse::<Tab>(), Ok(Tab::Employees));
        assert_eq!(" pets ".parse::<Tab>(), Ok(Tab::Pets));
        assert_eq!("produto".parse::<Tab>(), Ok(Tab::Products));
        assert_eq!("vacinas".parse::<Tab>(), Err(UnknownTab("vacinas".to_string())));
    }

    #[test]
    fn panels_are_wired_to_matching_resources() {
        let api = ApiClient::new(ClientConfig::default());
        let mut admin = AdminPanel::new(api, Arc::new(MemoryNotifier::new()));
        assert_eq!(admin.active(), Tab::Clients);
        for tab in Tab::ALL {
            admin.switch_tab(tab);
            assert_eq!(admin.active(), tab);
            assert_eq!(admin.active_panel().schema().resource, tab.title().to_lowercase());
        }
    }
}
