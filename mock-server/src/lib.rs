use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cliente {
    #[serde(rename = "idCliente")]
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
}

#[derive(Deserialize)]
pub struct ClienteInput {
    pub nome: String,
    pub cpf: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funcionario {
    #[serde(rename = "idFuncionario")]
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub cargo: String,
    pub salario_base: Option<f64>,
    pub salario_calculado: f64,
    pub data_contratacao: Option<String>,
    pub ativo: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuncionarioInput {
    pub nome: String,
    pub cpf: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub cargo: Option<String>,
    pub salario_base: Option<f64>,
    pub data_contratacao: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(rename = "idPet")]
    pub id: i64,
    pub id_cliente: Option<i64>,
    pub nome: String,
    pub especie: String,
    pub raca: Option<String>,
    pub data_nascimento: Option<String>,
    pub peso: Option<f64>,
    pub observacoes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetInput {
    pub id_cliente: Option<i64>,
    pub nome: String,
    pub especie: String,
    pub raca: Option<String>,
    pub data_nascimento: Option<String>,
    pub peso: Option<f64>,
    pub observacoes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Produto {
    #[serde(rename = "idProduto")]
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: Option<f64>,
    pub estoque: Option<i64>,
    pub categoria: Option<String>,
    pub ativo: bool,
}

#[derive(Deserialize)]
pub struct ProdutoInput {
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: Option<f64>,
    pub estoque: Option<i64>,
    pub categoria: Option<String>,
}

/// Salary after the role bonus: veterinarians earn 1.5x, groomers 1.2x.
pub fn salario_calculado(cargo: &str, salario_base: Option<f64>) -> f64 {
    let base = salario_base.unwrap_or(0.0);
    match cargo.to_ascii_uppercase().as_str() {
        "VETERINARIO" => base * 1.5,
        "TOSADOR" => base * 1.2,
        _ => base,
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

pub struct Rows<R> {
    next_id: i64,
    rows: BTreeMap<i64, R>,
}

impl<R> Default for Rows<R> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

#[derive(Default)]
pub struct Clinic {
    clientes: Rows<Cliente>,
    funcionarios: Rows<Funcionario>,
    pets: Rows<Pet>,
    produtos: Rows<Produto>,
}

pub type Db = Arc<RwLock<Clinic>>;

/// A record type served under `/api/{PATH}`.
pub trait Resource: Serialize + Clone + Send + Sync + 'static {
    type Input: DeserializeOwned + Send + 'static;

    /// Capitalized singular used in messages.
    const LABEL: &'static str;

    fn build(id: i64, input: Self::Input) -> Self;
    fn rows(clinic: &Clinic) -> &Rows<Self>;
    fn rows_mut(clinic: &mut Clinic) -> &mut Rows<Self>;
}

impl Resource for Cliente {
    type Input = ClienteInput;
    const LABEL: &'static str = "Cliente";

    fn build(id: i64, input: ClienteInput) -> Self {
        Cliente {
            id,
            nome: input.nome,
            cpf: input.cpf,
            telefone: input.telefone,
            email: input.email,
            endereco: input.endereco,
        }
    }

    fn rows(clinic: &Clinic) -> &Rows<Self> {
        &clinic.clientes
    }

    fn rows_mut(clinic: &mut Clinic) -> &mut Rows<Self> {
        &mut clinic.clientes
    }
}

impl Resource for Funcionario {
    type Input = FuncionarioInput;
    const LABEL: &'static str = "Funcionario";

    fn build(id: i64, input: FuncionarioInput) -> Self {
        let cargo = input.cargo.unwrap_or_else(|| "ATENDENTE".to_string());
        Funcionario {
            id,
            salario_calculado: salario_calculado(&cargo, input.salario_base),
            nome: input.nome,
            cpf: input.cpf,
            telefone: input.telefone,
            email: input.email,
            cargo,
            salario_base: input.salario_base,
            data_contratacao: input.data_contratacao,
            ativo: true,
        }
    }

    fn rows(clinic: &Clinic) -> &Rows<Self> {
        &clinic.funcionarios
    }

    fn rows_mut(clinic: &mut Clinic) -> &mut Rows<Self> {
        &mut clinic.funcionarios
    }
}

impl Resource for Pet {
    type Input = PetInput;
    const LABEL: &'static str = "Pet";

    fn build(id: i64, input: PetInput) -> Self {
        Pet {
            id,
            id_cliente: input.id_cliente,
            nome: input.nome,
            especie: input.especie,
            raca: input.raca,
            data_nascimento: input.data_nascimento,
            peso: input.peso,
            observacoes: input.observacoes,
        }
    }

    fn rows(clinic: &Clinic) -> &Rows<Self> {
        &clinic.pets
    }

    fn rows_mut(clinic: &mut Clinic) -> &mut Rows<Self> {
        &mut clinic.pets
    }
}

impl Resource for Produto {
    type Input = ProdutoInput;
    const LABEL: &'static str = "Produto";

    fn build(id: i64, input: ProdutoInput) -> Self {
        Produto {
            id,
            nome: input.nome,
            descricao: input.descricao,
            preco: input.preco,
            estoque: input.estoque,
            categoria: input.categoria,
            ativo: true,
        }
    }

    fn rows(clinic: &Clinic) -> &Rows<Self> {
        &clinic.produtos
    }

    fn rows_mut(clinic: &mut Clinic) -> &mut Rows<Self> {
        &mut clinic.produtos
    }
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

type Failure = (StatusCode, Json<Value>);

fn not_found<R: Resource>() -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "erro": format!("{} nao encontrado", R::LABEL) })),
    )
}

fn crud<R: Resource>(router: Router<Db>, base: &str) -> Router<Db> {
    router
        .route(base, get(list::<R>).post(create::<R>))
        .route(
            &format!("{base}/{{id}}"),
            get(fetch::<R>).put(update::<R>).delete(remove::<R>),
        )
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Clinic::default()));
    let router = Router::new();
    let router = crud::<Cliente>(router, "/api/clientes");
    let router = crud::<Funcionario>(router, "/api/funcionarios");
    let router = crud::<Pet>(router, "/api/pets");
    let router = crud::<Produto>(router, "/api/produtos");
    router
        .route("/api/pets/cliente/{id_cliente}", get(pets_by_client))
        .route("/api/funcionarios/cargo/{cargo}", get(employees_by_role))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list<R: Resource>(State(db): State<Db>) -> Json<Vec<R>> {
    let clinic = db.read().await;
    Json(R::rows(&clinic).rows.values().cloned().collect())
}

async fn create<R: Resource>(
    State(db): State<Db>,
    Json(input): Json<R::Input>,
) -> (StatusCode, Json<R>) {
    let mut clinic = db.write().await;
    let rows = R::rows_mut(&mut clinic);
    let id = rows.next_id;
    rows.next_id += 1;
    let record = R::build(id, input);
    rows.rows.insert(id, record.clone());
    tracing::debug!(resource = R::LABEL, id, "created");
    (StatusCode::CREATED, Json(record))
}

async fn fetch<R: Resource>(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<R>, Failure> {
    let clinic = db.read().await;
    R::rows(&clinic).rows.get(&id).cloned().map(Json).ok_or_else(not_found::<R>)
}

async fn update<R: Resource>(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<R::Input>,
) -> Result<Json<R>, Failure> {
    let mut clinic = db.write().await;
    let rows = R::rows_mut(&mut clinic);
    let slot = rows.rows.get_mut(&id).ok_or_else(not_found::<R>)?;
    *slot = R::build(id, input);
    Ok(Json(slot.clone()))
}

async fn remove<R: Resource>(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, Failure> {
    let mut clinic = db.write().await;
    R::rows_mut(&mut clinic).rows.remove(&id).ok_or_else(not_found::<R>)?;
    tracing::debug!(resource = R::LABEL, id, "deleted");
    Ok(Json(json!({ "mensagem": format!("{} deletado com sucesso", R::LABEL) })))
}

async fn pets_by_client(State(db): State<Db>, Path(id_cliente): Path<i64>) -> Json<Vec<Pet>> {
    let clinic = db.read().await;
    Json(
        clinic
            .pets
            .rows
            .values()
            .filter(|pet| pet.id_cliente == Some(id_cliente))
            .cloned()
            .collect(),
    )
}

async fn employees_by_role(State(db): State<Db>, Path(cargo): Path<String>) -> Json<Vec<Funcionario>> {
    let clinic = db.read().await;
    Json(
        clinic
            .funcionarios
            .rows
            .values()
            .filter(|f| f.cargo.eq_ignore_ascii_case(&cargo))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cliente_serializes_with_backend_names() {
        let cliente = Cliente {
            id: 1,
            nome: "Ana".to_string(),
            cpf: "123".to_string(),
            telefone: None,
            email: None,
            endereco: None,
        };
        let json = serde_json::to_value(&cliente).unwrap();
        assert_eq!(json["idCliente"], 1);
        assert_eq!(json["nome"], "Ana");
        assert!(json["telefone"].is_null());
    }

    #[test]
    fn funcionario_defaults_to_atendente() {
        let input: FuncionarioInput =
            serde_json::from_str(r#"{"nome":"Rui","cpf":"1","salarioBase":1000}"#).unwrap();
        let funcionario = Funcionario::build(3, input);
        assert_eq!(funcionario.cargo, "ATENDENTE");
        assert_eq!(funcionario.salario_calculado, 1000.0);
        assert!(funcionario.ativo);
        let json = serde_json::to_value(&funcionario).unwrap();
        assert_eq!(json["idFuncionario"], 3);
        assert_eq!(json["salarioBase"], 1000.0);
    }

    #[test]
    fn role_bonus_applies() {
        assert_eq!(salario_calculado("VETERINARIO", Some(2000.0)), 3000.0);
        assert_eq!(salario_calculado("tosador", Some(1000.0)), 1200.0);
        assert_eq!(salario_calculado("ATENDENTE", None), 0.0);
    }

    #[test]
    fn pet_input_requires_nome_and_especie() {
        let result: Result<PetInput, _> = serde_json::from_str(r#"{"idCliente":1,"nome":"Rex"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn pet_input_accepts_nulls() {
        let input: PetInput = serde_json::from_str(
            r#"{"idCliente":1,"nome":"Rex","especie":"Cachorro","raca":null,"peso":null}"#,
        )
        .unwrap();
        assert!(input.raca.is_none());
        assert!(input.peso.is_none());
    }
}
