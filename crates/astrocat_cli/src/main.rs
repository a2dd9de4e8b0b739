//! Astrocat CLI.
//!
//! # Responsibility
//! - Drive the core store the way the UI does: load once, then one action.
//! - Treat a load failure as fatal and exit non-zero.

mod cli;

use astrocat_core::{
    default_log_level, init_logging, AstroForm, AstroService, FsFileProvider, MediaLibrary,
    StoreConfig, TextField, UpsertOutcome,
};
use clap::Parser;
use cli::{Cli, Commands};
use log::warn;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(log_level(cli.level.as_deref()), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let config = StoreConfig::default();
    let provider = FsFileProvider::new(&cli.root);
    let mut service = match AstroService::open(provider, config.clone()) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("error: cannot load astro catalog: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::List => {
            list(&service);
            Ok(())
        }
        Commands::Show { name } => show(&service, &name),
        Commands::Add {
            name,
            star,
            category,
            short,
        } => {
            let form = add_form(name, star, category, short);
            service
                .submit(&form, None)
                .map(|outcome| report(outcome, &form.name))
                .map_err(|err| err.to_string())
        }
        Commands::Rename { from, to } => match service.edit_form(&from) {
            Some(form) => {
                let form = renamed_form(form, to);
                service
                    .submit(&form, Some(from.as_str()))
                    .map(|outcome| report(outcome, &form.name))
                    .map_err(|err| err.to_string())
            }
            None => Err(format!("astro not found: `{from}`")),
        },
        Commands::Delete { name } => service
            .delete(&name)
            .map(|removed| {
                if removed == 0 {
                    warn!("event=cli_delete module=cli status=noop");
                }
                println!("\"{name}\" deleted ({removed} record(s))");
            })
            .map_err(|err| err.to_string()),
        Commands::ImportMedia { path, astro } => {
            import_media(&mut service, &cli.root, &config, &path, astro.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn log_level(requested: Option<&str>) -> &str {
    requested.unwrap_or(default_log_level())
}

/// Form for `add`: only the fields the command exposes, the rest left blank.
fn add_form(name: String, star: String, category: String, short: String) -> AstroForm {
    AstroForm {
        name,
        star_name: star,
        category,
        short_description: short,
        ..AstroForm::default()
    }
}

fn renamed_form(form: AstroForm, to: String) -> AstroForm {
    AstroForm { name: to, ..form }
}

fn list(service: &AstroService<FsFileProvider>) {
    for group in service.group_by_category() {
        println!("{} ({})", group.category, group.astros.len());
        for astro in group.astros {
            println!(
                "  {} [{}] {}",
                astro.name,
                astro.system.star_name,
                astro.display_text(TextField::ShortDescription)
            );
        }
    }
}

fn show(service: &AstroService<FsFileProvider>, name: &str) -> Result<(), String> {
    let astro = service
        .find(name)
        .ok_or_else(|| format!("astro not found: `{name}`"))?;

    println!("{} ({})", astro.name, astro.category);
    println!(
        "System {} {} - orbit {}/{}",
        astro.system.star_name,
        astro.system.star_type,
        astro.system.orbital_position,
        astro.system.total_planets_in_system
    );
    if !astro.main_media_path.is_empty() {
        println!(
            "Media: {} ({})",
            astro.main_media_path,
            astro.main_media_type.as_str()
        );
    }
    for field in TextField::ALL {
        let text = astro.display_text(field);
        if !text.is_empty() {
            println!("\n[{field:?}]\n{text}");
        }
    }
    for moon in &astro.moons {
        println!("Moon: {} ({})", moon.name, moon.category);
    }
    Ok(())
}

fn import_media(
    service: &mut AstroService<FsFileProvider>,
    root: &str,
    config: &StoreConfig,
    path: &str,
    astro: Option<&str>,
) -> Result<(), String> {
    let library = MediaLibrary::new(root, config.media_dir.as_str());
    let import = library
        .import(Path::new(path))
        .map_err(|err| err.to_string())?;
    println!(
        "{} -> {} ({})",
        import.original_name,
        import.relative_path,
        import.media_type.as_str()
    );

    let Some(name) = astro else {
        return Ok(());
    };
    let mut form = service
        .edit_form(name)
        .ok_or_else(|| format!("astro not found: `{name}`"))?;
    form.attach_media(&import);
    service
        .submit(&form, Some(name))
        .map(|outcome| report(outcome, name))
        .map_err(|err| err.to_string())
}

fn report(outcome: UpsertOutcome, name: &str) {
    match outcome {
        UpsertOutcome::Created => println!("\"{name}\" created"),
        UpsertOutcome::Updated => println!("\"{name}\" updated"),
    }
}

#[cfg(test)]
mod tests {
    use super::{add_form, log_level, renamed_form};
    use crate::cli::{Cli, Commands};
    use astrocat_core::{default_log_level, AstroForm, Category, MoonRow};
    use clap::Parser;

    #[test]
    fn add_arguments_map_onto_form() {
        let cli = Cli::parse_from([
            "astrocat",
            "--root",
            "/tmp/catalog",
            "add",
            "--name",
            "Kepler-9",
            "--star",
            "Kepler",
            "--category",
            "Astros Tóxicos",
        ]);
        assert_eq!(cli.root, "/tmp/catalog");

        let Commands::Add {
            name,
            star,
            category,
            short,
        } = cli.command
        else {
            panic!("expected add command");
        };
        let form = add_form(name, star, category, short);

        assert_eq!(form.name, "Kepler-9");
        assert_eq!(form.star_name, "Kepler");
        assert_eq!(form.short_description, "");
        let record = form.into_record();
        assert_eq!(record.category, Category::Toxicos);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn rename_keeps_every_other_field() {
        let form = AstroForm {
            name: "Kepler-9".to_string(),
            star_name: "Kepler".to_string(),
            historia: "First\nSecond".to_string(),
            moons: vec![MoonRow {
                name: "Io".to_string(),
                category: "Astros Caóticos".to_string(),
            }],
            ..AstroForm::default()
        };

        let renamed = renamed_form(form.clone(), "Kepler-9b".to_string());

        assert_eq!(renamed.name, "Kepler-9b");
        assert_eq!(AstroForm { name: form.name.clone(), ..renamed }, form);
    }

    #[test]
    fn rename_takes_positional_names() {
        let cli = Cli::parse_from(["astrocat", "rename", "Old", "New"]);
        assert!(matches!(
            cli.command,
            Commands::Rename { ref from, ref to } if from == "Old" && to == "New"
        ));
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let cli = Cli::parse_from(["astrocat", "--level", "warn", "list"]);
        assert_eq!(log_level(cli.level.as_deref()), "warn");
        assert_eq!(log_level(None), default_log_level());
    }
}
