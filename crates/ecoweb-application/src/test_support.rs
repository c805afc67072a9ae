//! In-memory fakes of the core ports, for tests of this crate and its users.
//!
//! [`FakeDonationApi`] behaves like a small backend: it keeps conversations and
//! materials, enforces the workflow graph on its side, records every call and
//! can be told to fail an operation or hold the next request open.

use async_trait::async_trait;
use chrono::Utc;
use ecoweb_core::company::CompanyRegistration;
use ecoweb_core::conversation::{
    Conversation, ConversationApi, ConversationFilter, ConversationStatus, Message, PartyType,
    ReplyContent, Sender, WorkflowAction,
};
use ecoweb_core::dashboard::{Activity, DashboardApi, DashboardStats, MaterialSummary};
use ecoweb_core::material::{Material, MaterialApi, MaterialDraft, MaterialQuery, MaterialStatus};
use ecoweb_core::notification::{Notification, Notifier};
use ecoweb_core::report::{CategoryVolume, MonthlyVolume, ReportApi, ReportData, ReportPeriod};
use ecoweb_core::session::{
    AuthApi, Credentials, Navigator, Route, SessionToken, StoredToken, TokenStore,
};
use ecoweb_core::{EcowebError, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn conversation(id: &str, material_id: &str, status: ConversationStatus) -> Conversation {
    Conversation {
        id: id.to_string(),
        interested_party_name: format!("Interessado {}", id),
        interested_party_type: PartyType::Ong,
        material_id: material_id.to_string(),
        material_name: format!("Material {}", material_id),
        messages: vec![Message {
            id: format!("{}-1", id),
            sender: Sender::Interested,
            content: "Olá, ainda está disponível?".to_string(),
            timestamp: "2025-05-01T10:00:00Z".to_string(),
            read: false,
        }],
        last_message: "Olá, ainda está disponível?".to_string(),
        last_message_time: "2025-05-01T10:00:00Z".to_string(),
        unread_count: 1,
        status,
    }
}

pub fn material(id: &str, name: &str, status: MaterialStatus) -> Material {
    Material {
        id: id.to_string(),
        name: name.to_string(),
        category: "Madeira".to_string(),
        description: "Sobras de produção".to_string(),
        quantity: 10.0,
        unit_of_measure: "kg".to_string(),
        location: "São Paulo".to_string(),
        instructions: String::new(),
        status,
        fotos: vec!["foto.jpg".to_string()],
        interested_count: 0,
        updated_at: None,
    }
}

pub fn report(period: ReportPeriod) -> ReportData {
    ReportData {
        total_doado: 1500.0,
        co2_evitado: 320.5,
        projetos_atendidos: 12,
        materiais_por_categoria: vec![CategoryVolume {
            categoria: "Madeira".to_string(),
            quantidade: 1500.0,
            cor: None,
        }],
        volume_por_mes: vec![MonthlyVolume {
            mes: "Jan".to_string(),
            volume: 1500.0,
        }],
        periodo: period.to_string(),
    }
}

// ============================================================================
// FakeDonationApi
// ============================================================================

#[derive(Default)]
struct FakeBackend {
    accounts: Vec<(String, String, String)>,
    registered: Vec<CompanyRegistration>,
    conversations: Vec<Conversation>,
    materials: Vec<Material>,
    report: Option<ReportData>,
    export: Vec<u8>,
    dashboard_stats: Option<DashboardStats>,
    activities: Vec<Activity>,
    failing: HashSet<&'static str>,
    echo_records: bool,
    calls: Vec<&'static str>,
    next_id: u64,
    gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// Fake implementation of every API port.
///
/// Operation names used by [`fail`](Self::fail) and
/// [`call_count`](Self::call_count) are the trait method names
/// (`"login"`, `"transition"`, `"list_materials"`, ...).
#[derive(Default)]
pub struct FakeDonationApi {
    backend: Mutex<FakeBackend>,
}

impl FakeDonationApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&self, email_or_cnpj: &str, password: &str, token: &str) {
        lock(&self.backend).accounts.push((
            email_or_cnpj.to_string(),
            password.to_string(),
            token.to_string(),
        ));
    }

    pub fn add_conversation(&self, conversation: Conversation) {
        lock(&self.backend).conversations.push(conversation);
    }

    pub fn add_material(&self, material: Material) {
        lock(&self.backend).materials.push(material);
    }

    pub fn set_report(&self, report: ReportData, export: Vec<u8>) {
        let mut backend = lock(&self.backend);
        backend.report = Some(report);
        backend.export = export;
    }

    pub fn set_dashboard(&self, stats: DashboardStats, activities: Vec<Activity>) {
        let mut backend = lock(&self.backend);
        backend.dashboard_stats = Some(stats);
        backend.activities = activities;
    }

    /// Makes `operation` fail until [`succeed`](Self::succeed) is called.
    pub fn fail(&self, operation: &'static str) {
        lock(&self.backend).failing.insert(operation);
    }

    pub fn succeed(&self, operation: &'static str) {
        lock(&self.backend).failing.remove(operation);
    }

    /// Whether workflow transitions answer with the updated record.
    pub fn echo_records(&self, echo: bool) {
        lock(&self.backend).echo_records = echo;
    }

    /// Holds the next request open until the returned handle is notified.
    pub fn hold_next_request(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        lock(&self.backend).gate = Some(gate.clone());
        gate
    }

    /// Waits until at least `n` calls have reached the fake.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls().len() < n {
            tokio::task::yield_now().await;
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.backend).calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        lock(&self.backend)
            .calls
            .iter()
            .filter(|c| **c == operation)
            .count()
    }

    pub fn registered(&self) -> Vec<CompanyRegistration> {
        lock(&self.backend).registered.clone()
    }

    /// The backend's copy of a conversation.
    pub fn stored_conversation(&self, id: &str) -> Option<Conversation> {
        lock(&self.backend)
            .conversations
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// The backend's copy of a material.
    pub fn stored_material(&self, id: &str) -> Option<Material> {
        lock(&self.backend)
            .materials
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    /// Records the call, waits on a held gate, and reports whether the
    /// operation is set to fail.
    async fn enter(&self, operation: &'static str) -> bool {
        let (gate, failing) = {
            let mut backend = lock(&self.backend);
            backend.calls.push(operation);
            (backend.gate.take(), backend.failing.contains(operation))
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        failing
    }
}

#[async_trait]
impl AuthApi for FakeDonationApi {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken> {
        if self.enter("login").await {
            return Err(EcowebError::auth("Erro na conexão com servidor"));
        }
        lock(&self.backend)
            .accounts
            .iter()
            .find(|(user, password, _)| {
                *user == credentials.email_or_cnpj && *password == credentials.password
            })
            .map(|(_, _, token)| SessionToken::new(token.clone()))
            .ok_or_else(|| EcowebError::auth("Credenciais inválidas"))
    }

    async fn register_company(&self, company: &CompanyRegistration) -> Result<()> {
        if self.enter("register_company").await {
            return Err(EcowebError::auth("Falha ao cadastrar a empresa"));
        }
        lock(&self.backend).registered.push(company.clone());
        Ok(())
    }
}

#[async_trait]
impl ConversationApi for FakeDonationApi {
    async fn list_conversations(
        &self,
        _token: &SessionToken,
        filter: &ConversationFilter,
    ) -> Result<Vec<Conversation>> {
        if self.enter("list_conversations").await {
            return Err(EcowebError::fetch("HTTP 500 Internal Server Error"));
        }
        Ok(lock(&self.backend)
            .conversations
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn get_conversation(&self, _token: &SessionToken, id: &str) -> Result<Conversation> {
        if self.enter("get_conversation").await {
            return Err(EcowebError::fetch("HTTP 500 Internal Server Error"));
        }
        self.stored_conversation(id)
            .ok_or_else(|| EcowebError::fetch("Conversa não encontrada"))
    }

    async fn reply(
        &self,
        _token: &SessionToken,
        id: &str,
        content: &ReplyContent,
    ) -> Result<Message> {
        if self.enter("reply").await {
            return Err(EcowebError::action("send message", "HTTP 500 Internal Server Error"));
        }
        let mut backend = lock(&self.backend);
        let message_id = backend.next_id("msg");
        let conversation = backend
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| EcowebError::action("send message", "Conversa não encontrada"))?;
        let message = Message {
            id: message_id,
            sender: Sender::Company,
            content: content.as_str().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            read: true,
        };
        conversation.push_message(message.clone());
        Ok(message)
    }

    async fn transition(
        &self,
        _token: &SessionToken,
        id: &str,
        action: WorkflowAction,
    ) -> Result<Option<Conversation>> {
        if self.enter("transition").await {
            return Err(EcowebError::action(action.label(), "HTTP 500 Internal Server Error"));
        }
        let mut backend = lock(&self.backend);
        let echo = backend.echo_records;
        let conversation = backend
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| EcowebError::action(action.label(), "Conversa não encontrada"))?;
        let next = conversation
            .status
            .apply(action)
            .ok_or_else(|| EcowebError::action(action.label(), "HTTP 409 Conflict"))?;
        conversation.status = next;
        Ok(echo.then(|| conversation.clone()))
    }
}

#[async_trait]
impl MaterialApi for FakeDonationApi {
    async fn create_material(
        &self,
        _token: &SessionToken,
        draft: &MaterialDraft,
    ) -> Result<Material> {
        if self.enter("create_material").await {
            return Err(EcowebError::action("create material", "Não foi possível salvar o material"));
        }
        let mut backend = lock(&self.backend);
        let id = backend.next_id("mat");
        let created = Material {
            id,
            name: draft.name.clone(),
            category: draft.category.clone(),
            description: draft.description.clone(),
            quantity: draft.quantity,
            unit_of_measure: draft.unit_of_measure.clone(),
            location: draft.location.clone(),
            instructions: draft.instructions.clone(),
            status: draft.status,
            fotos: draft.fotos.clone(),
            interested_count: 0,
            updated_at: Some(Utc::now().to_rfc3339()),
        };
        backend.materials.push(created.clone());
        Ok(created)
    }

    async fn list_materials(
        &self,
        _token: &SessionToken,
        query: &MaterialQuery,
    ) -> Result<Vec<Material>> {
        if self.enter("list_materials").await {
            return Err(EcowebError::fetch("HTTP 500 Internal Server Error"));
        }
        let search = query.search.as_deref().map(str::to_lowercase);
        Ok(lock(&self.backend)
            .materials
            .iter()
            .filter(|m| query.status.is_none_or(|s| m.status == s))
            .filter(|m| {
                search.as_deref().is_none_or(|s| {
                    m.name.to_lowercase().contains(s) || m.category.to_lowercase().contains(s)
                })
            })
            .cloned()
            .collect())
    }

    async fn get_material(&self, _token: &SessionToken, id: &str) -> Result<Material> {
        if self.enter("get_material").await {
            return Err(EcowebError::fetch("HTTP 500 Internal Server Error"));
        }
        self.stored_material(id)
            .ok_or_else(|| EcowebError::fetch("Material não encontrado"))
    }

    async fn update_material(
        &self,
        _token: &SessionToken,
        id: &str,
        draft: &MaterialDraft,
    ) -> Result<Material> {
        if self.enter("update_material").await {
            return Err(EcowebError::action("update material", "Não foi possível atualizar o material"));
        }
        let mut backend = lock(&self.backend);
        let material = backend
            .materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| EcowebError::action("update material", "Material não encontrado"))?;
        material.name = draft.name.clone();
        material.category = draft.category.clone();
        material.description = draft.description.clone();
        material.quantity = draft.quantity;
        material.unit_of_measure = draft.unit_of_measure.clone();
        material.location = draft.location.clone();
        material.instructions = draft.instructions.clone();
        material.status = draft.status;
        material.fotos = draft.fotos.clone();
        material.updated_at = Some(Utc::now().to_rfc3339());
        Ok(material.clone())
    }

    async fn delete_material(&self, _token: &SessionToken, id: &str) -> Result<()> {
        if self.enter("delete_material").await {
            return Err(EcowebError::action("delete material", "Não foi possível excluir o material"));
        }
        let mut backend = lock(&self.backend);
        let before = backend.materials.len();
        backend.materials.retain(|m| m.id != id);
        if backend.materials.len() == before {
            return Err(EcowebError::action("delete material", "Material não encontrado"));
        }
        Ok(())
    }

    async fn change_material_status(
        &self,
        _token: &SessionToken,
        id: &str,
        status: MaterialStatus,
    ) -> Result<()> {
        if self.enter("change_material_status").await {
            return Err(EcowebError::action("change material status", "Não foi possível alterar o status"));
        }
        let mut backend = lock(&self.backend);
        let material = backend
            .materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| EcowebError::action("change material status", "Material não encontrado"))?;
        material.status = status;
        Ok(())
    }
}

#[async_trait]
impl ReportApi for FakeDonationApi {
    async fn fetch_report(&self, _token: &SessionToken, period: ReportPeriod) -> Result<ReportData> {
        if self.enter("fetch_report").await {
            return Err(EcowebError::fetch("HTTP 500 Internal Server Error"));
        }
        lock(&self.backend)
            .report
            .clone()
            .map(|mut r| {
                r.periodo = period.to_string();
                r
            })
            .ok_or_else(|| EcowebError::fetch("Relatório indisponível"))
    }

    async fn export_report(&self, _token: &SessionToken, _period: ReportPeriod) -> Result<Vec<u8>> {
        if self.enter("export_report").await {
            return Err(EcowebError::action("export report", "Falha na exportação"));
        }
        Ok(lock(&self.backend).export.clone())
    }
}

#[async_trait]
impl DashboardApi for FakeDonationApi {
    async fn fetch_stats(&self, _token: &SessionToken) -> Result<DashboardStats> {
        if self.enter("fetch_stats").await {
            return Err(EcowebError::fetch("HTTP 500 Internal Server Error"));
        }
        lock(&self.backend)
            .dashboard_stats
            .clone()
            .ok_or_else(|| EcowebError::fetch("Estatísticas indisponíveis"))
    }

    /// Like the real endpoint, may include donated listings.
    async fn recent_materials(
        &self,
        _token: &SessionToken,
        limit: usize,
    ) -> Result<Vec<MaterialSummary>> {
        if self.enter("recent_materials").await {
            return Err(EcowebError::fetch("HTTP 500 Internal Server Error"));
        }
        Ok(lock(&self.backend)
            .materials
            .iter()
            .take(limit)
            .map(|m| MaterialSummary {
                id: m.id.clone(),
                nome: m.name.clone(),
                status: m.status,
                interessados: m.interested_count,
                data_publicacao: m.updated_at.clone(),
            })
            .collect())
    }

    async fn recent_activities(&self, _token: &SessionToken) -> Result<Vec<Activity>> {
        if self.enter("recent_activities").await {
            return Err(EcowebError::fetch("HTTP 500 Internal Server Error"));
        }
        Ok(lock(&self.backend).activities.clone())
    }
}

// ============================================================================
// Session fakes
// ============================================================================

/// Token store kept in memory. Returns records as stored, expired or not.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<StoredToken>>,
    fail_loads: AtomicBool,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<StoredToken> {
        lock(&self.token).clone()
    }

    pub fn put(&self, token: StoredToken) {
        *lock(&self.token) = Some(token);
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<StoredToken>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(EcowebError::io("token store unavailable"));
        }
        Ok(self.current())
    }

    async fn save(&self, token: &StoredToken) -> Result<()> {
        self.put(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *lock(&self.token) = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(Notification::is_error)
            .collect()
    }

    pub fn last(&self) -> Option<Notification> {
        lock(&self.notifications).last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        lock(&self.notifications).push(notification);
    }
}
