use crate::bootstrap::AppContext;
use anyhow::Result;
use ecoweb_core::dashboard::DashboardOverview;
use ecoweb_core::session::Route;

pub async fn show(ctx: &AppContext) -> Result<()> {
    ctx.require(Route::Dashboard).await?;
    let overview = ctx.dashboard.load().await?;
    print!("{}", render(&overview));
    Ok(())
}

fn render(overview: &DashboardOverview) -> String {
    let stats = overview.stats.clone().unwrap_or_default();
    let mut out = String::new();
    out.push_str(&format!("Materiais ativos:    {}\n", stats.materiais_ativos));
    out.push_str(&format!("Propostas recebidas: {}\n", stats.propostas_recebidas));
    out.push_str(&format!("Total doado:         {} ton\n", stats.total_doado));

    out.push_str("\nMateriais ativos\n");
    if overview.active_materials.is_empty() {
        out.push_str("  Nenhum material ativo encontrado\n");
    }
    for material in &overview.active_materials {
        out.push_str(&format!(
            "  [{}] {} - {} ({} interessados)\n",
            material.id, material.nome, material.status, material.interessados
        ));
    }

    out.push_str("\nAtividades recentes\n");
    if overview.activities.is_empty() {
        out.push_str("  Nenhuma atividade recente\n");
    }
    for activity in &overview.activities {
        out.push_str(&format!("  • {}\n", activity.mensagem));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoweb_core::dashboard::{DashboardStats, MaterialSummary};
    use ecoweb_core::material::MaterialStatus;

    #[test]
    fn test_render_empty_sections() {
        let overview = DashboardOverview::new(
            Some(DashboardStats {
                materiais_ativos: 1,
                total_doado: 2.5,
                ..DashboardStats::default()
            }),
            vec![MaterialSummary {
                id: "7".to_string(),
                nome: "Paletes".to_string(),
                status: MaterialStatus::Publicado,
                interessados: 3,
                data_publicacao: None,
            }],
            Vec::new(),
        );

        let text = render(&overview);
        assert!(text.contains("Total doado:         2.5 ton"));
        assert!(text.contains("[7] Paletes - Publicado (3 interessados)"));
        assert!(text.contains("Nenhuma atividade recente"));
    }
}
