use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, ArticleDashboard, ClientEvent, Field, HttpArticleService, HttpSession,
    ListStateKind, NotificationLevel, ParagraphEditor, RichTextField, SubmitOutcome,
};
use shared::domain::ArticleId;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Manage your published articles")]
struct Args {
    /// Overrides the configured backend URL.
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// Session cookie value identifying the signed-in user.
    #[arg(long, global = true)]
    session: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Create {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Comma-separated tags.
        #[arg(long, default_value = "")]
        tags: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tags: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    if let Some(session) = args.session {
        settings.session = Some(session);
    }

    let service = HttpArticleService::from_settings(&settings)
        .with_context(|| format!("invalid backend configuration '{}'", settings.backend_url))?;
    let session = HttpSession::from_settings(&settings).context("invalid session configuration")?;
    let mut dashboard = ArticleDashboard::new(
        Arc::new(service),
        Arc::new(session),
        RichTextField::with_editor(Arc::new(ParagraphEditor)),
    );
    let mut events = dashboard.subscribe_events();

    if dashboard.load().await.kind() == ListStateKind::Error {
        print_notifications(&mut events);
        println!("{}", dashboard.list().render());
        bail!("could not load articles from {}", settings.backend_url);
    }

    match args.command {
        Command::List => {}
        Command::Create {
            title,
            description,
            tags,
        } => {
            let form = dashboard.form_mut();
            form.set_field(Field::Title, &title);
            form.set_tags(&tags);
            dashboard
                .type_description(&description)
                .context("description editor unavailable")?;
            report(dashboard.submit().await);
        }
        Command::Edit {
            id,
            title,
            description,
            tags,
        } => {
            if !dashboard.edit(&ArticleId::new(id.clone())) {
                bail!("no article with id '{id}' in your list");
            }
            if let Some(title) = title {
                dashboard.form_mut().set_field(Field::Title, &title);
            }
            if let Some(tags) = tags {
                dashboard.form_mut().set_tags(&tags);
            }
            if let Some(description) = description {
                dashboard
                    .type_description(&description)
                    .context("description editor unavailable")?;
            }
            report(dashboard.submit().await);
        }
        Command::Delete { id } => {
            // The failure toast below already tells the user what happened.
            let _ = dashboard.delete(&ArticleId::new(id)).await;
        }
    }

    print_notifications(&mut events);
    println!("{}", dashboard.render());
    Ok(())
}

fn report(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors {
                eprintln!("{field}: {message}");
            }
        }
        SubmitOutcome::Busy => eprintln!("another submission is still pending"),
        SubmitOutcome::Created(article) => tracing::debug!(article_id = %article.id, "created"),
        SubmitOutcome::Updated(article) => tracing::debug!(article_id = %article.id, "updated"),
        SubmitOutcome::Failed(err) => tracing::debug!(%err, "submit failed"),
    }
}

fn print_notifications(events: &mut broadcast::Receiver<ClientEvent>) {
    while let Ok(event) = events.try_recv() {
        if let ClientEvent::Notification(notification) = event {
            match notification.level {
                NotificationLevel::Success => println!("✔ {}", notification.message),
                NotificationLevel::Error => eprintln!("✘ {}", notification.message),
            }
        }
    }
}
