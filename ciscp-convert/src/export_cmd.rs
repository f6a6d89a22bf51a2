use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cisco_acl_core::parse_file;
use ciscp_convert::emit::build_api_export;
use ciscp_convert::service_map::{default_service_map, load_service_map, ServiceMap};
use ciscp_convert::translate::{translate, TranslateOptions};

use crate::cli::ExportArgs;
use crate::convert_cmd::shadow_policy;

pub fn run_export(args: ExportArgs) -> Result<()> {
    let doc = parse_file(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    let options = TranslateOptions {
        shadow_policy: shadow_policy(args.keep_shadowed),
    };
    let translation = translate(&doc, &options);

    let services = resolve_services(args.services_file.as_deref());
    let export = build_api_export(
        &translation.objects,
        &translation.rules,
        &services,
        &args.layer,
    );
    let json = serde_json::to_string_pretty(&export)?;

    match args.output {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("failed to write export file {}", path.display()))?,
        None => println!("{json}"),
    }

    if export.skipped_services > 0 {
        eprintln!(
            "warning: {} rule(s) skipped for services without a table entry",
            export.skipped_services
        );
    }

    Ok(())
}

fn resolve_services(path: Option<&Path>) -> ServiceMap {
    let Some(path) = path else {
        return default_service_map();
    };
    match load_service_map(path) {
        Ok(map) => map,
        Err(err) => {
            eprintln!(
                "warning: failed to load services from {} ({err}); using embedded defaults",
                path.display()
            );
            default_service_map()
        }
    }
}
