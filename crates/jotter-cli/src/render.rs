// Plain-text rendering of form views and note listings

use jotter_core::{CacheRead, Field, FormPhase, FormView, Note, SubmitOutcome};

pub fn form_view(view: &FormView) -> String {
    let mut out = String::new();

    if view.phase == FormPhase::Closed {
        out.push_str("(form closed, type `new` to start another note)\n");
        return out;
    }

    for field in Field::ALL {
        out.push_str(&format!(
            "  {:<8} {}\n",
            format!("{}:", field),
            view.values.get(field)
        ));
        if let Some(message) = view.errors.get(&field) {
            out.push_str(&format!("           ! {}\n", message));
        }
    }

    if let Some(banner) = &view.submission_error {
        out.push_str(&format!("  {}\n", banner));
    }
    out.push_str(&format!("  [{}]\n", view.submit_label));
    out
}

pub fn outcome(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Saved(note) => format!("Saved note {} ({})", note.title, note.tag),
        SubmitOutcome::Invalid(errors) => {
            let fields: Vec<&str> = errors.keys().map(Field::name).collect();
            format!("Fix the highlighted fields: {}", fields.join(", "))
        }
        SubmitOutcome::Failed => "Save failed".to_string(),
        SubmitOutcome::Ignored => "Submit ignored".to_string(),
        SubmitOutcome::Discarded => "Save finished after the form was closed".to_string(),
    }
}

pub fn notes(notes: &[Note], source: CacheRead) -> String {
    let source = match source {
        CacheRead::Hit => "cached",
        CacheRead::Fetched => "refetched",
    };

    if notes.is_empty() {
        return format!("No notes ({})\n", source);
    }

    let mut out = format!("{} note(s) ({})\n", notes.len(), source);
    for note in notes {
        out.push_str(&format!(
            "  [{}] {} - {}\n",
            note.tag, note.title, note.content
        ));
    }
    out
}
