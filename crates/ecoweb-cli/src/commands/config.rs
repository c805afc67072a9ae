use anyhow::{Result, bail};
use ecoweb_core::config::EcowebConfig;
use ecoweb_infrastructure::{ConfigService, EcowebPaths};
use ecoweb_interaction::Endpoints;

pub fn show(config: &EcowebConfig, paths: &EcowebPaths) -> Result<()> {
    println!("Arquivo: {}", paths.config_file().display());
    println!("api.base_url = {}", config.api.base_url);
    println!("api.timeout_secs = {}", config.api.timeout_secs);
    println!("session.token_ttl_days = {}", config.session.token_ttl_days);
    println!("session.cookie_name = {}", config.session.cookie_name);
    println!("session.cookie_path = {}", config.session.cookie_path);
    println!("log_level = {}", config.log_level);
    Ok(())
}

pub fn set(
    service: &ConfigService,
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    log_level: Option<String>,
) -> Result<()> {
    if api_url.is_none() && timeout_secs.is_none() && log_level.is_none() {
        bail!("Nada para alterar: use --api-url, --timeout-secs ou --log-level");
    }
    if let Some(url) = &api_url {
        Endpoints::new(url)?;
    }
    if timeout_secs == Some(0) {
        bail!("--timeout-secs deve ser maior que zero");
    }

    let written = service.update(|config| {
        if let Some(url) = api_url {
            config.api.base_url = url;
        }
        if let Some(secs) = timeout_secs {
            config.api.timeout_secs = secs;
        }
        if let Some(level) = log_level {
            config.log_level = level;
        }
    })?;
    println!("✅ Configuração salva (api.base_url = {})", written.api.base_url);
    Ok(())
}
