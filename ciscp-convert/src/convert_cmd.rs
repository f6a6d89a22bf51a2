use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use cisco_acl_core::parse_file;
use ciscp_convert::dedup::ShadowPolicy;
use ciscp_convert::emit::{render_objects, render_rules};
use ciscp_convert::report::{render_findings, render_summary};
use ciscp_convert::translate::{translate, TranslateOptions, Translation};

use crate::cli::{ConvertArgs, OutputFormat};

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    ensure_output_not_input(&args.input, &[&args.objects_out, &args.rules_out])?;

    let doc = parse_file(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    let options = TranslateOptions {
        shadow_policy: shadow_policy(args.keep_shadowed),
    };
    let translation = translate(&doc, &options);

    fs::write(&args.objects_out, render_objects(&translation.objects)).with_context(|| {
        format!("failed to write objects file {}", args.objects_out.display())
    })?;
    fs::write(&args.rules_out, render_rules(&translation.rules))
        .with_context(|| format!("failed to write rules file {}", args.rules_out.display()))?;

    match args.format {
        OutputFormat::Text => {
            if !args.quiet && !translation.findings.is_empty() {
                println!("{}", render_findings(&translation.findings));
            }
            println!("{}", render_summary(&translation.summary));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&convert_report(&translation))?);
        }
    }

    Ok(())
}

pub fn shadow_policy(keep_shadowed: bool) -> ShadowPolicy {
    if keep_shadowed {
        ShadowPolicy::Keep
    } else {
        ShadowPolicy::Suppress
    }
}

fn ensure_output_not_input(input: &Path, outputs: &[&Path]) -> Result<()> {
    for output in outputs {
        if *output == input {
            bail!(
                "output file {} would overwrite the input ACL",
                output.display()
            );
        }
    }
    Ok(())
}

fn convert_report(translation: &Translation) -> serde_json::Value {
    serde_json::json!({
        "summary": translation.summary,
        "findings": translation.findings,
        "objects": translation.objects.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
        "rules": translation.rules.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
    })
}
