//! Registration runner: one-shot when both fields are given on the command
//! line, otherwise an interactive form that can be resubmitted until the
//! server accepts it.

use std::sync::Arc;

use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    error::ClientError,
    infrastructure::{gateway::HttpRegistrationGateway, view::TerminalFormView},
    usecase::{SubmitRegistrationUseCase, SubmitResult},
};

#[derive(Debug, Clone)]
pub struct RegisterOptions {
    /// Base URL of the server hosting `/submit`
    pub base_url: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Use ANSI styling for banners
    pub styled: bool,
}

/// Submit the registration form.
///
/// Returns the outcome of the last submission, or `None` if the user quit
/// before submitting anything.
pub async fn run_register(options: RegisterOptions) -> Result<Option<SubmitResult>, ClientError> {
    let gateway = HttpRegistrationGateway::new(&options.base_url)?;
    tracing::info!("Submitting registrations to {}", gateway.endpoint());
    let usecase = SubmitRegistrationUseCase::new(Arc::new(gateway));
    let mut view = TerminalFormView::new(Some(std::io::stdout()), options.styled);

    if let (Some(name), Some(email)) = (&options.name, &options.email) {
        return Ok(Some(usecase.execute(&mut view, name, email).await));
    }

    view.fields.name = options.name.unwrap_or_default();
    view.fields.email = options.email.unwrap_or_default();
    let mut editor = DefaultEditor::new()?;
    let mut last = None;

    loop {
        let (next_editor, name) = prompt(editor, "Name: ", view.fields.name.clone()).await?;
        let Some(name) = name else { break };
        let (next_editor, email) = prompt(next_editor, "Email: ", view.fields.email.clone()).await?;
        editor = next_editor;
        let Some(email) = email else { break };

        view.fields.name = name.clone();
        view.fields.email = email.clone();
        let result = usecase.execute(&mut view, &name, &email).await;
        let accepted = result.is_accepted();
        last = Some(result);
        if accepted {
            break;
        }
    }

    Ok(last)
}

/// Prompt for one field off the async runtime. `None` when the user quits.
async fn prompt(
    mut editor: DefaultEditor,
    label: &'static str,
    initial: String,
) -> Result<(DefaultEditor, Option<String>), ClientError> {
    let (editor, line) = tokio::task::spawn_blocking(move || {
        let line = editor.readline_with_initial(label, (&initial, ""));
        (editor, line)
    })
    .await
    .map_err(|e| ClientError::Readline(e.to_string()))?;

    match line {
        Ok(line) => Ok((editor, Some(line))),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok((editor, None)),
        Err(e) => Err(e.into()),
    }
}
