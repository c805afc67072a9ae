use crate::RegisterArgs;
use crate::bootstrap::AppContext;
use anyhow::Result;
use ecoweb_core::EcowebError;
use ecoweb_core::company::CompanyRegistrationForm;
use ecoweb_core::session::LoginForm;

pub async fn login(ctx: &AppContext, email_or_cnpj: String, password: String) -> Result<()> {
    let credentials = LoginForm {
        email_or_cnpj,
        password,
    }
    .validate()
    .map_err(EcowebError::from)?;

    ctx.session.login(&credentials).await?;
    println!("✅ Login realizado com sucesso");
    Ok(())
}

pub async fn logout(ctx: &AppContext) {
    ctx.session.logout().await;
    println!("👋 Sessão encerrada");
}

pub async fn status(ctx: &AppContext) {
    let session = ctx.session.session().await;
    if session.is_authenticated {
        println!("Sessão: autenticada");
    } else {
        println!("Sessão: não autenticada");
    }
    println!("API: {}", ctx.config.api.base_url);
    println!("Configuração: {}", ctx.paths.config_file().display());
    println!("Sessão salva em: {}", ctx.paths.session_file().display());
}

pub async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    let form = CompanyRegistrationForm {
        name: args.name,
        cnpj: args.cnpj,
        responsible_name: args.responsible_name,
        email: args.email,
        phone: args.phone,
        location: args.location,
        cep: args.cep,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    ctx.session.register(&form).await?;
    println!("✅ Empresa cadastrada. Entre com `ecoweb login`.");
    Ok(())
}
