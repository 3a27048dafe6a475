use std::sync::Arc;

use anyhow::Context;
use intake_di::Build;
use intake_templates_contracts::{
    Template, TemplateService, BASE_TEMPLATE, BASE_TEMPLATE_NAME, TEMPLATES,
};
use tera::Tera;

#[derive(Debug, Clone, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        tera.add_raw_template(BASE_TEMPLATE_NAME, BASE_TEMPLATE).unwrap();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)
            .context("Failed to build template context")?;
        self.state
            .0
            .render(T::NAME, &context)
            .with_context(|| format!("Failed to render template {}", T::NAME))
    }
}
