//! Applications launched by the platform

use bramble_core::ServiceRegistry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Normal termination
pub const EXIT_OK: i32 = 0;

/// Internal software error, e.g. the configured application does not exist
pub const EXIT_SOFTWARE: i32 = 70;

/// What an application sees while it runs
#[derive(Debug, Clone)]
pub struct ApplicationContext {
    application_id: String,
    args: Vec<String>,
    test_plugin: Option<String>,
    services: Arc<ServiceRegistry>,
}

impl ApplicationContext {
    pub fn new(
        application_id: impl Into<String>,
        args: Vec<String>,
        test_plugin: Option<String>,
        services: Arc<ServiceRegistry>,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            args,
            test_plugin,
            services,
        }
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Application arguments, argv[0] first
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Bundle under test when launched with a test plugin
    pub fn test_plugin(&self) -> Option<&str> {
        self.test_plugin.as_deref()
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }
}

/// An application the platform can launch. Returns the process exit code.
pub trait Application: Send + Sync {
    fn run(&self, ctx: &ApplicationContext) -> i32;
}

impl<F> Application for F
where
    F: Fn(&ApplicationContext) -> i32 + Send + Sync,
{
    fn run(&self, ctx: &ApplicationContext) -> i32 {
        self(ctx)
    }
}

/// Applications registered by id
#[derive(Clone, Default)]
pub struct ApplicationRegistry {
    applications: HashMap<String, Arc<dyn Application>>,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an application; a later registration under the same id replaces it
    pub fn register<A>(&mut self, id: impl Into<String>, application: A)
    where
        A: Application + 'static,
    {
        let id = id.into();
        if self
            .applications
            .insert(id.clone(), Arc::new(application))
            .is_some()
        {
            tracing::debug!(application = %id, "application replaced");
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Application>> {
        self.applications.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.applications.contains_key(id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.applications.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl fmt::Debug for ApplicationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationRegistry")
            .field("applications", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    struct Fixed(i32);

    impl Application for Fixed {
        fn run(&self, _ctx: &ApplicationContext) -> i32 {
            self.0
        }
    }

    fn context(args: &[&str]) -> ApplicationContext {
        ApplicationContext::new(
            "org.example.app",
            args.iter().map(|a| a.to_string()).collect(),
            None,
            Arc::new(ServiceRegistry::new()),
        )
    }

    #[test]
    fn ApplicationRegistry___register___struct_and_closure() {
        let mut registry = ApplicationRegistry::new();
        registry.register("fixed", Fixed(3));
        registry.register("closure", |ctx: &ApplicationContext| ctx.args().len() as i32);

        let ctx = context(&["viewer", "a", "b"]);

        assert_eq!(registry.get("fixed").unwrap().run(&ctx), 3);
        assert_eq!(registry.get("closure").unwrap().run(&ctx), 3);
        assert_eq!(registry.ids(), vec!["closure", "fixed"]);
    }

    #[test]
    fn ApplicationRegistry___register___same_id_replaces() {
        let mut registry = ApplicationRegistry::new();
        registry.register("app", Fixed(1));
        registry.register("app", Fixed(2));

        assert_eq!(registry.get("app").unwrap().run(&context(&[])), 2);
    }

    #[test]
    fn ApplicationRegistry___get___unknown_id_is_none() {
        let registry = ApplicationRegistry::new();

        assert!(registry.get("missing").is_none());
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn ApplicationContext___accessors___expose_launch_data() {
        let ctx = ApplicationContext::new(
            "org.example.tests",
            vec!["viewer".to_string()],
            Some("org.example.plugin".to_string()),
            Arc::new(ServiceRegistry::new()),
        );

        assert_eq!(ctx.application_id(), "org.example.tests");
        assert_eq!(ctx.args(), ["viewer".to_string()]);
        assert_eq!(ctx.test_plugin(), Some("org.example.plugin"));
        assert!(ctx.services().is_empty());
    }
}
