//! Interactive form session
//!
//! Reads one command per line and drives a [`FormController`]. A submit runs
//! alongside input handling, so `show`, edits and `cancel` still work while
//! a save is in flight.

mod input;

pub use input::{Input, InputParseError, HELP};

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use futures::future::{FutureExt, LocalBoxFuture};
use jotter_core::{FormController, FormHost, FormPhase, SubmitOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::app::App;
use crate::render;

type PendingSubmit = LocalBoxFuture<'static, SubmitOutcome>;

enum Flow {
    Continue,
    Quit,
}

pub async fn execute(app: &App) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut session = FormSession::new(app, std::io::stdout());
    session.run(stdin).await
}

pub struct FormSession<'a, W: Write> {
    app: &'a App,
    form: Arc<FormController>,
    pending: Option<PendingSubmit>,
    out: W,
}

impl<'a, W: Write> FormSession<'a, W> {
    pub fn new(app: &'a App, out: W) -> Self {
        Self {
            app,
            form: Arc::new(app.mount_form(session_host())),
            pending: None,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit` or end of input
    pub async fn run<R>(&mut self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        info!("Starting form session");
        writeln!(self.out, "{}", HELP)?;
        self.show()?;

        let mut lines = reader.lines();
        loop {
            tokio::select! {
                biased;

                outcome = poll_pending(&mut self.pending) => {
                    self.pending = None;
                    self.report(&outcome)?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match Input::parse(&line) {
                        Ok(input) => {
                            if let Flow::Quit = self.handle(input).await? {
                                break;
                            }
                        }
                        Err(e) => writeln!(self.out, "{e} (type `help` for commands)")?,
                    }
                }
            }
            self.out.flush()?;
        }

        // Let an in-flight save settle before leaving
        if let Some(pending) = self.pending.take() {
            let outcome = pending.await;
            self.report(&outcome)?;
        }

        info!("Form session ended");
        Ok(())
    }

    async fn handle(&mut self, input: Input) -> Result<Flow> {
        debug!(?input, "Form session input");
        match input {
            Input::Empty => {}
            Input::Set(field, value) => {
                self.form.set_field(field, value);
                self.show()?;
            }
            Input::Blur(field) => {
                self.form.blur(field);
                self.show()?;
            }
            Input::Submit => {
                if self.pending.is_some() {
                    // The form refuses a second submit while one is in flight
                    let outcome = self.form.submit().await;
                    writeln!(self.out, "{}", render::outcome(&outcome))?;
                } else {
                    let form = self.form.clone();
                    self.pending = Some(async move { form.submit().await }.boxed_local());
                }
            }
            Input::Cancel => {
                if self.form.cancel() {
                    writeln!(self.out, "Cancelled")?;
                }
                self.show()?;
            }
            Input::Show => self.show()?,
            Input::Notes(search) => match self.app.list_notes(search.as_deref()).await {
                Ok((notes, source)) => write!(self.out, "{}", render::notes(&notes, source))?,
                Err(e) => writeln!(self.out, "Could not list notes: {e}")?,
            },
            Input::New => {
                if self.form.phase() == FormPhase::Closed && self.pending.is_none() {
                    self.form = Arc::new(self.app.mount_form(session_host()));
                    self.show()?;
                } else {
                    writeln!(self.out, "Finish or cancel the current note first")?;
                }
            }
            Input::Help => writeln!(self.out, "{}", HELP)?,
            Input::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show(&mut self) -> Result<()> {
        write!(self.out, "{}", render::form_view(&self.form.view()))?;
        Ok(())
    }

    fn report(&mut self, outcome: &SubmitOutcome) -> Result<()> {
        writeln!(self.out, "{}", render::outcome(outcome))?;
        self.show()
    }
}

fn session_host() -> Arc<dyn FormHost> {
    Arc::new(|| debug!("Form closed"))
}

async fn poll_pending(pending: &mut Option<PendingSubmit>) -> SubmitOutcome {
    match pending.as_mut() {
        Some(submit) => submit.await,
        None => std::future::pending().await,
    }
}
