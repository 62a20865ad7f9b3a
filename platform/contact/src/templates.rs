//! Server rendered pages.
//!
//! Templates are embedded at compile time and rendered with HTML auto
//! escaping, so every value coming from a visitor is safe to interpolate.

use minijinja::{context, Environment, Error};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::database::Message;
use crate::message::update::EditOutcome;
use crate::message::{FormOutcome, MessageForm, CREATED_NOTICE, UPDATED_NOTICE};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

pub(crate) const TEMPLATES: &[(&str, &str)] = &[
	("base.html", include_str!("../templates/base.html")),
	("form_alerts.html", include_str!("../templates/form_alerts.html")),
	("message_fields.html", include_str!("../templates/message_fields.html")),
	("create.html", include_str!("../templates/create.html")),
	("edit.html", include_str!("../templates/edit.html")),
	("list.html", include_str!("../templates/list.html")),
];

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
	let mut env = Environment::new();

	for &(name, source) in TEMPLATES {
		if let Err(err) = env.add_template(name, source) {
			tracing::error!(template = name, error = %err, "failed to load template");
		}
	}

	env
});

struct FormView<'a> {
	form: &'a MessageForm,
	errors: Vec<String>,
	success: Option<&'static str>,
}

impl<'a> FormView<'a> {
	fn new(outcome: &'a FormOutcome, notice: &'static str) -> Self {
		Self {
			form: &outcome.form,
			errors: outcome.errors.iter().map(ToString::to_string).collect(),
			success: outcome.success().then_some(notice),
		}
	}
}

#[derive(Serialize)]
struct MessageRow<'a> {
	id: i64,
	name: &'a str,
	email: &'a str,
	body_lines: Vec<&'a str>,
	submitted_at: String,
}

impl<'a> From<&'a Message> for MessageRow<'a> {
	fn from(message: &'a Message) -> Self {
		Self {
			id: message.id,
			name: &message.name,
			email: &message.email,
			body_lines: message.body.lines().collect(),
			submitted_at: message.submitted_at.format(DATE_FORMAT).to_string(),
		}
	}
}

pub fn render_create(outcome: &FormOutcome) -> Result<String, Error> {
	let view = FormView::new(outcome, CREATED_NOTICE);

	ENV.get_template("create.html")?.render(context! {
		form => view.form,
		errors => view.errors,
		success => view.success,
	})
}

pub fn render_edit(edit: &EditOutcome) -> Result<String, Error> {
	let view = FormView::new(&edit.outcome, UPDATED_NOTICE);

	ENV.get_template("edit.html")?.render(context! {
		id => edit.id,
		form => view.form,
		errors => view.errors,
		success => view.success,
	})
}

pub fn render_list(messages: &[Message]) -> Result<String, Error> {
	let rows: Vec<MessageRow<'_>> = messages.iter().map(MessageRow::from).collect();

	ENV.get_template("list.html")?.render(context! { messages => rows })
}
