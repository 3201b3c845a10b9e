use super::{Cloud, Controller, Model};
use crate::shared::Result;
use std::collections::HashSet;

/// Include/exclude sets applied while walking controllers and models
///
/// The first applicable rule decides whether a model is selected:
/// 1. with included controllers, the controller must be included and not excluded;
/// 2. otherwise, with included models, the full or short name must be
///    included and that same name must not be excluded;
/// 3. otherwise, every model is selected unless its controller, full name or
///    short name is excluded.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    include_controllers: HashSet<String>,
    include_models: HashSet<String>,
    exclude_controllers: HashSet<String>,
    exclude_models: HashSet<String>,
}

impl Selection {
    /// Selects every model
    pub fn all() -> Self {
        Self::default()
    }

    pub fn include_controllers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_controllers.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn include_models<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_models.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn exclude_controllers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_controllers.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn exclude_models<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_models.extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns true when `model` is selected
    pub fn selects(&self, model: &Model) -> bool {
        let controller = model.controller();

        if !self.include_controllers.is_empty() {
            return self.include_controllers.contains(controller)
                && !self.exclude_controllers.contains(controller);
        }

        if !self.include_models.is_empty() {
            return [model.name(), model.short_name()].iter().any(|name| {
                self.include_models.contains(*name) && !self.exclude_models.contains(*name)
            });
        }

        !self.exclude_controllers.contains(controller)
            && !self.exclude_models.contains(model.name())
            && !self.exclude_models.contains(model.short_name())
    }

    /// Returns false only when no model of `controller` can be selected,
    /// which lets a traversal skip listing its models.
    fn may_select_controller(&self, controller: &str) -> bool {
        if !self.include_controllers.is_empty() {
            return self.include_controllers.contains(controller)
                && !self.exclude_controllers.contains(controller);
        }
        if !self.include_models.is_empty() {
            return true;
        }
        !self.exclude_controllers.contains(controller)
    }
}

/// Lazy depth-first walk over the models of a [`Cloud`] matching a [`Selection`]
///
/// Listings are requested only as the walk reaches them. The first listing
/// error is yielded once and ends the walk.
pub struct ModelFilter<'a> {
    cloud: &'a Cloud,
    selection: &'a Selection,
    controllers: Option<std::slice::Iter<'a, Controller>>,
    models: Option<std::slice::Iter<'a, Model>>,
    finished: bool,
}

impl<'a> ModelFilter<'a> {
    pub(crate) fn new(cloud: &'a Cloud, selection: &'a Selection) -> Self {
        Self {
            cloud,
            selection,
            controllers: None,
            models: None,
            finished: false,
        }
    }

    fn fail(&mut self, err: anyhow::Error) -> Option<Result<&'a Model>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for ModelFilter<'a> {
    type Item = Result<&'a Model>;

    fn next(&mut self) -> Option<Self::Item> {
        let selection = self.selection;

        while !self.finished {
            if let Some(models) = self.models.as_mut() {
                if let Some(model) = models.find(|m| selection.selects(m)) {
                    return Some(Ok(model));
                }
                self.models = None;
            }

            if self.controllers.is_none() {
                match self.cloud.controllers() {
                    Ok(controllers) => self.controllers = Some(controllers.iter()),
                    Err(e) => return self.fail(e),
                }
            }

            let Some(controller) = self.controllers.as_mut().and_then(Iterator::next) else {
                self.finished = true;
                break;
            };

            if !selection.may_select_controller(controller.name()) {
                tracing::debug!(controller = %controller.name(), "skipping excluded controller");
                continue;
            }

            match controller.models() {
                Ok(models) => self.models = Some(models.iter()),
                Err(e) => return self.fail(e),
            }
        }

        None
    }
}
