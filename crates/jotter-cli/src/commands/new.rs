// One-shot note creation from command-line flags

use std::sync::Arc;

use anyhow::{bail, Result};
use jotter_core::{Field, FormHost, SubmitOutcome};
use tracing::info;

use crate::app::App;
use crate::cli::NewArgs;
use crate::render;

pub async fn execute(app: &App, args: NewArgs) -> Result<()> {
    if args.fail {
        app.store().set_fail_creates(true);
    }

    let host: Arc<dyn FormHost> = Arc::new(|| info!("Note form closed"));
    let form = app.mount_form(host);
    form.set_field(Field::Title, args.title);
    form.set_field(Field::Content, args.content);
    form.set_field(Field::Tag, args.tag);

    let outcome = form.submit().await;
    let view = form.view();

    if args.json {
        let mut report = serde_json::to_value(&view)?;
        if let SubmitOutcome::Saved(note) = &outcome {
            report["note"] = serde_json::to_value(note)?;
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render::outcome(&outcome));
        if !matches!(outcome, SubmitOutcome::Saved(_)) {
            print!("{}", render::form_view(&view));
        }
    }

    match outcome {
        SubmitOutcome::Saved(_) => Ok(()),
        SubmitOutcome::Invalid(_) => bail!("note is invalid"),
        _ => bail!("note was not saved"),
    }
}
