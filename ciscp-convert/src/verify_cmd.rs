use anyhow::{bail, Context, Result};
use cisco_acl_core::parse_file;
use ciscp_convert::report::{render_findings, render_summary};
use ciscp_convert::translate::{translate, TranslateOptions};

use crate::cli::{OutputFormat, VerifyArgs};
use crate::convert_cmd::shadow_policy;

pub fn run_verify(args: VerifyArgs) -> Result<()> {
    let doc = parse_file(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    let options = TranslateOptions {
        shadow_policy: shadow_policy(args.keep_shadowed),
    };
    let translation = translate(&doc, &options);
    let errors = translation.error_count();
    let warnings = translation.warning_count();

    match args.format {
        OutputFormat::Text => {
            if !translation.findings.is_empty() {
                println!("{}", render_findings(&translation.findings));
            }
            println!("{}", render_summary(&translation.summary));
            println!("result errors={errors} warnings={warnings}");
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "errors": errors,
                "warnings": warnings,
                "findings": translation.findings,
                "summary": translation.summary,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if errors > 0 {
        bail!("verify failed: {errors} errors");
    }
    if args.strict && warnings > 0 {
        bail!("verify failed in strict mode: {warnings} warnings");
    }
    Ok(())
}
