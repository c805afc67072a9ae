use crate::bootstrap::AppContext;
use anyhow::{Result, anyhow};
use ecoweb_core::report::ReportPeriod;
use ecoweb_core::session::Route;
use std::path::Path;
use std::str::FromStr;

fn parse_period(period: &str) -> Result<ReportPeriod> {
    ReportPeriod::from_str(period).map_err(|_| {
        anyhow!(
            "Período inválido '{}': use ultimo-trimestre, ultimo-semestre, ano-2025, ano-2024 ou todos",
            period
        )
    })
}

pub async fn show(ctx: &AppContext, period: &str) -> Result<()> {
    let period = parse_period(period)?;
    ctx.require(Route::Reports).await?;
    let report = ctx.reports.fetch(period).await?;

    println!("Relatório de impacto - {}", period.label());
    println!("Total doado: {:.1}", report.total_doado);
    println!("CO₂ evitado: {:.1} kg", report.co2_evitado);
    println!("Projetos atendidos: {}", report.projetos_atendidos);

    if !report.materiais_por_categoria.is_empty() {
        println!("\nPor categoria:");
        for (category, share) in report.category_shares() {
            println!("  {:<14} {:>5.1}%", category, share * 100.0);
        }
    }
    if !report.volume_por_mes.is_empty() {
        println!("\nPor mês:");
        for month in &report.volume_por_mes {
            println!("  {:<6} {:.1}", month.mes, month.volume);
        }
    }
    Ok(())
}

pub async fn export(ctx: &AppContext, period: &str, out: &Path) -> Result<()> {
    let period = parse_period(period)?;
    ctx.require(Route::Reports).await?;
    let path = ctx.reports.export(period, out).await?;
    println!("📄 Relatório salvo em {}", path.display());
    Ok(())
}
