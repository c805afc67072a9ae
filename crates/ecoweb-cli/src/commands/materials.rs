use crate::MaterialArgs;
use crate::bootstrap::AppContext;
use anyhow::{Context, Result, anyhow};
use ecoweb_core::material::{
    Material, MaterialForm, MaterialQuery, MaterialStatus, MaterialStatusChange, PhotoSource,
};
use ecoweb_core::session::Route;

fn parse_status(status: &str) -> Result<MaterialStatus> {
    MaterialStatus::parse_lenient(status).ok_or_else(|| {
        anyhow!(
            "Status inválido '{}': use publicado, em-negociacao, pausado ou doado",
            status
        )
    })
}

/// Builds the form; photo files are checked locally and rejected ones reported.
fn to_form(args: MaterialArgs) -> Result<MaterialForm> {
    let mut photos = Vec::new();
    for path in &args.photos {
        let size_bytes = std::fs::metadata(path)
            .with_context(|| format!("Não foi possível ler {}", path.display()))?
            .len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("Caminho de foto inválido: {}", path.display()))?;
        photos.push(PhotoSource::Upload {
            file_name,
            size_bytes,
        });
    }
    photos.extend(args.existing_photos.into_iter().map(PhotoSource::Existing));

    let mut form = MaterialForm {
        name: args.name,
        category: args.category,
        description: args.description,
        quantity: args.quantity,
        unit_of_measure: args.unit,
        location: args.location,
        instructions: args.instructions,
        fotos: Vec::new(),
    };
    for reason in form.attach_photos(photos) {
        eprintln!("⚠️  {}", reason);
    }
    Ok(form)
}

fn print_row(material: &Material) {
    println!(
        "{:<12} {:<14} {} ({}) - {}, {} interessado(s)",
        material.id,
        material.status,
        material.name,
        material.category,
        material.quantity_label(),
        material.interested_count
    );
}

pub async fn list(ctx: &AppContext, search: Option<String>, status: Option<&str>) -> Result<()> {
    let status = status.map(parse_status).transpose()?;
    ctx.require(Route::Materials).await?;

    let materials = ctx.materials.list(&MaterialQuery { search, status }).await?;
    if materials.is_empty() {
        println!("Nenhum material encontrado");
    }
    for material in &materials {
        print_row(material);
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.require(Route::Material(id.to_string())).await?;
    let material = ctx.materials.get(id).await?;

    print_row(&material);
    println!("Descrição: {}", material.description);
    println!("Retirada: {}", material.location);
    if !material.instructions.is_empty() {
        println!("Instruções: {}", material.instructions);
    }
    for foto in &material.fotos {
        println!("Foto: {}", foto);
    }
    Ok(())
}

pub async fn create(ctx: &AppContext, args: MaterialArgs) -> Result<()> {
    ctx.require(Route::NewMaterial).await?;
    let form = to_form(args)?;
    let created = ctx.materials.create(&form).await?;
    println!("✅ Material publicado: {}", created.id);
    Ok(())
}

pub async fn update(ctx: &AppContext, id: &str, args: MaterialArgs) -> Result<()> {
    ctx.require(Route::Material(id.to_string())).await?;
    let form = to_form(args)?;
    let updated = ctx.materials.update(id, &form).await?;
    print_row(&updated);
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.require(Route::Materials).await?;
    ctx.materials.delete(id).await?;
    println!("🗑️  Material {} excluído", id);
    Ok(())
}

pub async fn change_status(ctx: &AppContext, id: &str, change: MaterialStatusChange) -> Result<()> {
    ctx.require(Route::Materials).await?;
    let material = ctx.materials.change_status(id, change).await?;
    print_row(&material);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("Em Negociação").unwrap(), MaterialStatus::EmNegociacao);
        assert_eq!(parse_status("em-negociacao").unwrap(), MaterialStatus::EmNegociacao);
        assert!(parse_status("Vendido").is_err());
    }
}
