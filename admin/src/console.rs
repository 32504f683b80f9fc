//! Terminal front end: notifications, confirmation prompts and the
//! read-eval-print loop over an `AdminPanel`.

use std::io::{self, BufRead, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info, warn};
use vetclinic_core::{
    AdminPanel, ApiError, Confirm, Entity, EntityStore, FormMode, LoadStatus, ModalState, Notification,
    NotificationKind, Notifier, Panel, Schema, Tab, Table,
};

use crate::command::{Command, HELP};

/// Prints notifications to the terminal and mirrors them to the log.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(message = %notification.message, "operation succeeded");
                println!("[ok] {}", notification.message);
            }
            NotificationKind::Error => {
                warn!(message = %notification.message, "operation failed");
                eprintln!("[erro] {}", notification.message);
            }
        }
    }
}

/// Asks on stdin. Anything but an explicit yes declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [s/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "s" | "sim" | "y" | "yes")
}

pub fn render_tabs(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            let marker = if tab == active { '*' } else { ' ' };
            format!("{marker} {}", tab.title())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_form(schema: &Schema, modal: &ModalState) -> String {
    let ModalState::Open { mode, form } = modal else {
        return "Nenhum formulario aberto".to_string();
    };
    let title = match mode {
        FormMode::Create => format!("Novo {}", schema.noun),
        FormMode::Edit(id) => format!("Editar {} #{id}", schema.noun),
    };
    let mut lines = vec![title];
    for field in schema.fields {
        let required = if field.required { "*" } else { "" };
        lines.push(format!("  {}{required} ({}): {}", field.label, field.name, form.get(field.name)));
    }
    lines.join("\n")
}

fn prompt(admin: &AdminPanel) -> String {
    let tab = admin.active().title().to_lowercase();
    match admin.active_panel().modal() {
        ModalState::Open { mode: FormMode::Create, .. } => format!("{tab} [novo]> "),
        ModalState::Open { mode: FormMode::Edit(id), .. } => format!("{tab} [#{id}]> "),
        ModalState::Closed => format!("{tab}> "),
    }
}

fn table(admin: &AdminPanel) -> Step {
    Step::Print(admin.active_panel().table().to_string())
}

fn form(admin: &AdminPanel) -> Step {
    let panel: &dyn Panel = admin.active_panel();
    Step::Print(render_form(&panel.schema(), panel.modal()))
}

/// Render the outcome of a lookup outside the active list.
fn lookup<E: Entity>(result: Result<Vec<E>, ApiError>) -> Step {
    let mut store = EntityStore::new();
    let status = match result {
        Ok(records) => {
            store.replace_all(records);
            LoadStatus::Loaded
        }
        Err(err) => LoadStatus::Failed(err.to_string()),
    };
    Step::Print(Table::project(&store, &status).to_string())
}

pub enum Step {
    Print(String),
    Continue,
    Quit,
}

/// Apply one command to the panel and say what to show next.
pub fn execute(admin: &mut AdminPanel, command: Command, confirm: &dyn Confirm) -> Step {
    debug!(?command, tab = %admin.active(), "executing");
    match command {
        Command::Tab(None) => Step::Print(render_tabs(admin.active())),
        Command::Tab(Some(tab)) => {
            admin.switch_tab(tab);
            table(admin)
        }
        Command::List => table(admin),
        Command::Reload => {
            admin.active_panel_mut().load();
            table(admin)
        }
        Command::New => {
            admin.active_panel_mut().open_new();
            form(admin)
        }
        Command::Edit(id) => {
            admin.active_panel_mut().open_edit(id);
            if admin.active_panel().modal().is_open() {
                form(admin)
            } else {
                Step::Continue
            }
        }
        Command::Set { field, value } => match admin.active_panel_mut().set_field(&field, &value) {
            Ok(()) => Step::Continue,
            Err(err) => Step::Print(err.to_string()),
        },
        Command::Show => form(admin),
        Command::Save => {
            if admin.active_panel_mut().save() {
                table(admin)
            } else {
                Step::Continue
            }
        }
        Command::Cancel => {
            admin.active_panel_mut().cancel();
            Step::Continue
        }
        Command::Delete(id) => {
            if let Some(row) = admin.active_panel().row(id) {
                println!("{}", row.join(" | "));
            }
            if admin.active_panel_mut().delete(id, confirm) {
                table(admin)
            } else {
                Step::Continue
            }
        }
        Command::PetsOf(client_id) => lookup(admin.api().pets_by_client(client_id)),
        Command::Role(role) => lookup(admin.api().employees_by_role(&role)),
        Command::Help => Step::Print(HELP.to_string()),
        Command::Quit => Step::Quit,
    }
}

pub fn run(admin: &mut AdminPanel) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("{}", admin.active_panel().table());

    loop {
        let line = match editor.readline(&prompt(admin)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        editor.add_history_entry(line.as_str())?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err:#}");
                continue;
            }
        };
        match execute(admin, command, &StdinConfirm) {
            Step::Print(output) => println!("{output}"),
            Step::Continue => {}
            Step::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vetclinic_core::{ApiClient, Client, ClientConfig, Entity, FormData, MemoryNotifier};

    use super::*;

    fn offline_admin() -> AdminPanel {
        // Nothing listens on port 9.
        let api = ApiClient::new(ClientConfig::new("http://127.0.0.1:9"));
        AdminPanel::new(api, Arc::new(MemoryNotifier::new()))
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("s\n"));
        assert!(is_yes(" Sim "));
        assert!(is_yes("y"));
        assert!(!is_yes(""));
        assert!(!is_yes("nao"));
    }

    #[test]
    fn tabs_mark_the_active_one() {
        let rendered = render_tabs(Tab::Pets);
        assert!(rendered.contains("* Pets"));
        assert!(rendered.contains("  Clientes"));
    }

    #[test]
    fn form_lists_every_field_with_required_marker() {
        let modal = ModalState::Open {
            mode: FormMode::Edit(3),
            form: FormData::new().with("nome", "Ana").with("cpf", "123"),
        };
        let rendered = render_form(&Client::SCHEMA, &modal);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Editar cliente #3");
        assert_eq!(lines[1], "  Nome* (nome): Ana");
        assert_eq!(lines[3], "  Telefone (telefone): ");
        assert_eq!(lines.len(), 1 + Client::SCHEMA.fields.len());
    }

    #[test]
    fn closed_form_renders_notice() {
        assert_eq!(render_form(&Client::SCHEMA, &ModalState::Closed), "Nenhum formulario aberto");
    }

    #[test]
    fn form_commands_work_without_a_server() {
        let mut admin = offline_admin();
        let never = |_: &str| false;

        assert!(matches!(execute(&mut admin, Command::Tab(Some(Tab::Products)), &never), Step::Print(_)));
        assert_eq!(prompt(&admin), "produtos> ");

        execute(&mut admin, Command::New, &never);
        assert_eq!(prompt(&admin), "produtos [novo]> ");
        assert!(admin.active_panel().modal().is_open());

        let step = execute(
            &mut admin,
            Command::Set {
                field: "validade".to_string(),
                value: "2025".to_string(),
            },
            &never,
        );
        assert!(matches!(step, Step::Print(message) if message == "Campo desconhecido: validade"));

        execute(&mut admin, Command::Cancel, &never);
        assert_eq!(prompt(&admin), "produtos> ");
        assert!(matches!(execute(&mut admin, Command::Delete(1), &never), Step::Continue));
        assert!(matches!(execute(&mut admin, Command::Quit, &never), Step::Quit));
    }

    #[test]
    fn failed_lookup_renders_error_row() {
        let mut admin = offline_admin();
        let never = |_: &str| false;
        let Step::Print(output) = execute(&mut admin, Command::PetsOf(4), &never) else {
            panic!("lookup should print a table");
        };
        assert!(output.starts_with("ID | Nome | Especie | Raca | Cliente"));
        assert!(output.contains("Erro de conexao"));
    }
}
