//! URL map of the EcoWeb backend.

use ecoweb_core::conversation::{ConversationFilter, WorkflowAction};
use ecoweb_core::material::MaterialQuery;
use ecoweb_core::report::ReportPeriod;
use ecoweb_core::{EcowebError, Result};
use reqwest::Url;

/// Builds absolute request URLs from the configured base URL.
///
/// Path segments are percent-encoded, so ids are safe to pass through as-is.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| EcowebError::config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(EcowebError::config(format!(
                "Invalid API base URL '{}': not a hierarchical URL",
                base_url
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn company_scoped(&self, segments: &[&str]) -> Url {
        let mut url = self.join(segments);
        url.query_pairs_mut().append_pair("q", "company");
        url
    }

    /// `POST /auth/login?q=company`
    pub fn login(&self) -> Url {
        self.company_scoped(&["auth", "login"])
    }

    /// `POST /auth/register?q=company`
    pub fn register(&self) -> Url {
        self.company_scoped(&["auth", "register"])
    }

    /// `GET /empresa/mensagens[?materialId=]`
    pub fn conversations(&self, filter: &ConversationFilter) -> Url {
        let mut url = self.join(&["empresa", "mensagens"]);
        if let Some(material_id) = &filter.material_id {
            url.query_pairs_mut().append_pair("materialId", material_id);
        }
        url
    }

    /// `GET /mensagens/{id}`
    pub fn conversation(&self, id: &str) -> Url {
        self.join(&["mensagens", id])
    }

    /// `POST /mensagens/{id}/reply`
    pub fn conversation_reply(&self, id: &str) -> Url {
        self.join(&["mensagens", id, "reply"])
    }

    /// `POST /mensagens/{id}/{schedule|confirm|reject|archive}`
    pub fn conversation_action(&self, id: &str, action: WorkflowAction) -> Url {
        self.join(&["mensagens", id, action.endpoint()])
    }

    /// `GET|POST /materials[?search=&status=]`
    pub fn materials(&self, query: Option<&MaterialQuery>) -> Url {
        let mut url = self.join(&["materials"]);
        if let Some(query) = query {
            let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
            if search.is_some() || query.status.is_some() {
                let mut pairs = url.query_pairs_mut();
                if let Some(search) = search {
                    pairs.append_pair("search", search);
                }
                if let Some(status) = query.status {
                    pairs.append_pair("status", status.query_value());
                }
            }
        }
        url
    }

    /// `GET|PUT|DELETE /materials/{id}`
    pub fn material(&self, id: &str) -> Url {
        self.join(&["materials", id])
    }

    /// `PATCH /materials/{id}/status`
    pub fn material_status(&self, id: &str) -> Url {
        self.join(&["materials", id, "status"])
    }

    /// `GET /empresa/dashboard/stats`
    pub fn dashboard_stats(&self) -> Url {
        self.join(&["empresa", "dashboard", "stats"])
    }

    /// `GET /empresa/materiais?limit=&status=ativo`
    pub fn recent_materials(&self, limit: usize) -> Url {
        let mut url = self.join(&["empresa", "materiais"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("status", "ativo");
        url
    }

    /// `GET /empresa/atividades`
    pub fn activities(&self) -> Url {
        self.join(&["empresa", "atividades"])
    }

    /// `GET /empresa/relatorios?periodo=`
    pub fn report(&self, period: ReportPeriod) -> Url {
        let mut url = self.join(&["empresa", "relatorios"]);
        url.query_pairs_mut().append_pair("periodo", &period.to_string());
        url
    }

    /// `POST /empresa/relatorios/export`
    pub fn report_export(&self) -> Url {
        self.join(&["empresa", "relatorios", "export"])
    }
}
