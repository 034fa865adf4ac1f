use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use crate::config::{IgnoreSet, Scope};
use crate::error::Result;
use crate::ids::LoaderId;
use crate::input::ClassReaderFactory;
use crate::loader::{ArrayRegistry, ClassLoader};
use crate::warnings::{Warning, WarningSink};

/// Everything a loader constructor needs. Alternative implementations
/// registered with the factory receive the same arguments as the default.
pub struct LoaderArgs {
    pub id: LoaderId,
    pub parent: Option<Arc<ClassLoader>>,
    pub arrays: Arc<ArrayRegistry>,
    pub reader: Arc<dyn ClassReaderFactory>,
    pub ignored: IgnoreSet,
    pub warnings: WarningSink,
}

/// Constructor for a named loader implementation. An `Err` falls back to
/// the default implementation with a recorded warning.
pub type LoaderCtor =
    Arc<dyn Fn(&LoaderArgs) -> std::result::Result<Arc<ClassLoader>, String> + Send + Sync>;

/// Builds and memoizes one loader per identifier, parents before children,
/// so a child can always delegate into an already-initialized parent.
pub struct LoaderFactory {
    scope: Scope,
    loaders: DashMap<LoaderId, Arc<ClassLoader>>,
    implementations: HashMap<String, LoaderCtor>,
    arrays: Arc<ArrayRegistry>,
    warnings: WarningSink,
}

impl LoaderFactory {
    pub fn new(scope: Scope, warnings: WarningSink) -> LoaderFactory {
        LoaderFactory {
            arrays: Arc::new(ArrayRegistry::new(warnings.clone())),
            scope,
            loaders: DashMap::new(),
            implementations: HashMap::new(),
            warnings,
        }
    }

    /// Register a loader implementation that scope configurations can
    /// select by name. Must happen before the first `get_loader`.
    pub fn register_implementation(&mut self, name: impl Into<String>, ctor: LoaderCtor) {
        self.implementations.insert(name.into(), ctor);
    }

    pub fn arrays(&self) -> &Arc<ArrayRegistry> {
        &self.arrays
    }

    pub fn warnings(&self) -> &WarningSink {
        &self.warnings
    }

    /// The loader for `id`, building (and `init`-ing, exactly once) it and
    /// any ancestors on first request.
    pub fn get_loader(&self, id: &LoaderId) -> Result<Arc<ClassLoader>> {
        if let Some(loader) = self.loaders.get(id) {
            return Ok(Arc::clone(loader.value()));
        }
        let parent = match self.scope.parent_of(id)? {
            Some(parent_id) => Some(self.get_loader(&parent_id)?),
            None => None,
        };
        let args = LoaderArgs {
            id: id.clone(),
            parent,
            arrays: Arc::clone(&self.arrays),
            reader: self.scope.reader(),
            ignored: self.scope.ignored().clone(),
            warnings: self.warnings.clone(),
        };
        let loader = self.construct(&args);
        let modules = self.scope.take_modules(id);
        loader.init(&modules)?;
        self.loaders.insert(id.clone(), Arc::clone(&loader));
        Ok(loader)
    }

    fn construct(&self, args: &LoaderArgs) -> Arc<ClassLoader> {
        let Some(implementation) = self.scope.implementation_of(&args.id) else {
            return ClassLoader::create(args);
        };
        let outcome = match self.implementations.get(implementation) {
            Some(ctor) => ctor(args),
            None => Err(format!("no implementation registered under {implementation}")),
        };
        match outcome {
            Ok(loader) => loader,
            Err(detail) => {
                // one bad loader config never aborts the run
                self.warnings.report(Warning::LoaderConstruction {
                    loader: args.id.clone(),
                    implementation: implementation.to_string(),
                    detail,
                });
                ClassLoader::create(args)
            }
        }
    }
}
