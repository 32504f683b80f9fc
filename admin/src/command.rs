//! Console command grammar.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use vetclinic_core::Tab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the tabs, or switch to one.
    Tab(Option<Tab>),
    List,
    Reload,
    New,
    Edit(i64),
    Set { field: String, value: String },
    Show,
    Save,
    Cancel,
    Delete(i64),
    /// Pets owned by one client.
    PetsOf(i64),
    /// Employees holding one role.
    Role(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
Comandos:
  tab [nome]            lista as abas ou troca de aba (clientes, funcionarios, pets, produtos)
  list                  mostra a tabela da aba atual
  reload                recarrega a aba atual do servidor
  new                   abre o formulario de cadastro
  edit <id>             abre o formulario de edicao do registro
  set <campo> [valor]   preenche um campo do formulario aberto
  show                  mostra o formulario aberto
  save                  envia o formulario
  cancel                fecha o formulario sem salvar
  delete <id>           exclui o registro (pede confirmacao)
  pets-of <id>          lista os pets de um cliente
  cargo <cargo>         lista os funcionarios de um cargo (VETERINARIO, TOSADOR, ATENDENTE)
  help                  mostra esta ajuda
  quit                  sai";

fn parse_id(arg: Option<&str>) -> anyhow::Result<i64> {
    let arg = arg.ok_or_else(|| anyhow!("informe o id"))?;
    arg.parse().with_context(|| format!("id invalido: {arg}"))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let arg = Some(rest).filter(|r| !r.is_empty());

        let command = match word.to_ascii_lowercase().as_str() {
            "tab" | "aba" => Command::Tab(arg.map(str::parse::<Tab>).transpose()?),
            "list" | "ls" => Command::List,
            "reload" => Command::Reload,
            "new" | "novo" => Command::New,
            "edit" | "editar" => Command::Edit(parse_id(arg)?),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    bail!("informe o campo");
                }
                Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "show" => Command::Show,
            "save" | "salvar" => Command::Save,
            "cancel" | "cancelar" => Command::Cancel,
            "delete" | "excluir" => Command::Delete(parse_id(arg)?),
            "pets-of" | "pets-do" => Command::PetsOf(parse_id(arg)?),
            "cargo" | "role" => {
                let role = arg.ok_or_else(|| anyhow!("informe o cargo"))?;
                Command::Role(role.to_ascii_uppercase())
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" | "sair" => Command::Quit,
            other => bail!("comando desconhecido: {other} (digite help)"),
        };
        Ok(command)
    }
}
