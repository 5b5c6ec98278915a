//! The interactive menu loop for one logged-in identity.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use scma::store::{ArtefactRepository, AuditLog};
use scma::{
    read_file_content, Action, ArtefactKind, ArtefactName, ArtefactView, Content, Identity, Vault,
    VaultError,
};

/// What the loop does after handling one choice.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// A menu session bound to an authenticated identity.
pub struct Session<'v, R, A, I, O> {
    vault: &'v Vault<R, A>,
    identity: Identity,
    input: I,
    output: O,
}

impl<'v, R, A, I, O> Session<'v, R, A, I, O>
where
    R: ArtefactRepository,
    A: AuditLog,
    I: BufRead,
    O: Write,
{
    pub fn new(vault: &'v Vault<R, A>, identity: Identity, input: I, output: O) -> Self {
        Self {
            vault,
            identity,
            input,
            output,
        }
    }

    /// Run until the user exits, input ends, or a fatal error occurs.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };
            if self.dispatch(choice.trim())? == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nOptions:")?;
        writeln!(self.output, "1. Create Artefact")?;
        writeln!(self.output, "2. Read Artefact")?;
        writeln!(self.output, "3. Update Artefact")?;
        if self.can_delete() {
            writeln!(self.output, "4. Delete Artefact")?;
        }
        writeln!(self.output, "5. Exit")
    }

    fn can_delete(&self) -> bool {
        self.vault.may(&self.identity, Action::Delete)
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        let outcome = match choice {
            "1" => self.create(),
            "2" => self.read(),
            "3" => self.update(),
            "4" if self.can_delete() => self.delete(),
            "5" => {
                writeln!(self.output, "Exiting application.")?;
                return Ok(Flow::Exit);
            }
            _ => {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                return Ok(Flow::Continue);
            }
        };

        match outcome {
            Ok(Some(message)) => writeln!(self.output, "{message}")?,
            // Input ended mid-prompt.
            Ok(None) => return Ok(Flow::Exit),
            Err(err) if err.is_fatal() => return Err(err).context("vault is unusable"),
            Err(err) => writeln!(self.output, "{}", user_message(&err))?,
        }
        Ok(Flow::Continue)
    }

    fn create(&mut self) -> Result<Option<String>, VaultError> {
        if !self.vault.may(&self.identity, Action::Create) {
            return Err(VaultError::Unauthorized(format!(
                "{} may not create artefacts",
                self.identity
            )));
        }
        let Some(name) = self.prompt_name("Enter artefact name: ")? else {
            return Ok(None);
        };
        let Some(kind) = self.prompt("Is this a text or file artefact? (text/file): ")? else {
            return Ok(None);
        };

        let content = match kind.parse::<ArtefactKind>()? {
            ArtefactKind::Text => match self.prompt("Enter artefact content: ")? {
                Some(text) => Content::Text(text),
                None => return Ok(None),
            },
            ArtefactKind::File => match self.prompt("Enter file path: ")? {
                Some(path) => read_file_content(path)?,
                None => return Ok(None),
            },
        };

        self.vault.create(&self.identity, &name, &content)?;
        Ok(Some("Artefact created successfully.".to_owned()))
    }

    fn read(&mut self) -> Result<Option<String>, VaultError> {
        let Some(name) = self.prompt_name("Enter artefact name to read: ")? else {
            return Ok(None);
        };
        let view = self.vault.read(&self.identity, &name)?;
        Ok(Some(render_view(&view)))
    }

    fn update(&mut self) -> Result<Option<String>, VaultError> {
        let Some(name) = self.prompt_name("Enter artefact name to update: ")? else {
            return Ok(None);
        };
        let Some(text) = self.prompt("Enter new content: ")? else {
            return Ok(None);
        };
        self.vault
            .update(&self.identity, &name, &Content::Text(text))?;
        Ok(Some("Artefact updated successfully.".to_owned()))
    }

    fn delete(&mut self) -> Result<Option<String>, VaultError> {
        let Some(name) = self.prompt_name("Enter artefact name to delete: ")? else {
            return Ok(None);
        };
        self.vault.delete(&self.identity, &name)?;
        Ok(Some("Artefact deleted successfully.".to_owned()))
    }

    fn prompt_name(&mut self, label: &str) -> Result<Option<ArtefactName>, VaultError> {
        match self.prompt(label)? {
            Some(raw) => Ok(Some(ArtefactName::parse(raw)?)),
            None => Ok(None),
        }
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>, VaultError> {
        prompt_line(&mut self.input, &mut self.output, label)
            .map_err(|e| VaultError::InvalidInput(format!("terminal: {e}")))
    }
}

/// Print `label`, then read one line without its terminator.
///
/// Returns `None` at end of input.
pub fn prompt_line(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']);
    Ok(Some(trimmed.to_owned()))
}

fn render_view(view: &ArtefactView) -> String {
    let content = match view.content.as_text() {
        Some(text) => text.to_owned(),
        None => format!("<{} bytes of binary data>", view.content.len()),
    };
    let mut out = format!(
        "Content: {content}\nHash: {}\nTimestamp: {}",
        view.digest, view.timestamp
    );
    if !view.digest_matches {
        out.push_str("\nWarning: content does not match its stored hash.");
    }
    out
}

fn user_message(err: &VaultError) -> String {
    match err {
        VaultError::Unauthorized(_) => "Unauthorized action.".to_owned(),
        VaultError::NotFound(_) => "Artefact not found.".to_owned(),
        VaultError::Conflict(name) => format!("Artefact {name} already exists."),
        VaultError::InvalidInput(reason) => format!("Invalid input: {reason}."),
        VaultError::Decryption(_) => "Artefact could not be decrypted.".to_owned(),
        VaultError::Audit {
            action: Action::Read,
            ..
        } => "Artefact not shown: the audit log could not be written.".to_owned(),
        VaultError::Audit { action, .. } => format!(
            "Artefact {}, but the audit log could not be written.",
            action.past_tense()
        ),
        other => format!("Error: {other}"),
    }
}
