//! Isolated loading of compiled test modules.
//!
//! A test module is a dynamic library built against this crate. It exports
//! one well-known static, [`ModuleSpec`], declared through
//! [`declare_module!`](crate::declare_module), naming the module, its
//! dependencies, and a registration function that populates a
//! [`SuiteRegistry`] at load time.
//!
//! The isolation boundary is the [`TestModule`] value: it owns every library
//! handle pulled in for one run and releases them all atomically on unload.
//! Nothing loaded for one module is shared with, or visible to, another.
//!
//! # Safety
//!
//! Loading a dynamic library executes code from it in this process. Modules
//! must be built against the same `pariksha` version and toolchain as the
//! runner; the entry symbol is the only contract between the two.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use libloading::Library;

use crate::errors::ParikshaError;
use crate::registry::SuiteRegistry;

/// Symbol every test module must export. See [`declare_module!`](crate::declare_module).
pub const ENTRY_SYMBOL: &[u8] = b"PARIKSHA_MODULE";

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// The static a test module exports to describe itself.
pub struct ModuleSpec {
    /// Human-readable module name, printed in run headers.
    pub name: &'static str,
    /// Names of dependency artifacts expected alongside the module file.
    /// Absent artifacts are skipped, present ones are loaded into the same
    /// context.
    pub dependencies: &'static [&'static str],
    /// Called once at load time to register the module's suites.
    pub register: fn(&mut SuiteRegistry),
}

/// Declares the entry point of a test module.
///
/// ```ignore
/// fn register(registry: &mut pariksha::registry::SuiteRegistry) {
///     registry.register(/* ... */);
/// }
///
/// pariksha::declare_module!("arithmetic-tests", deps: ["mathlib"], register);
/// ```
#[macro_export]
macro_rules! declare_module {
    ($name:expr, deps: [$($dep:expr),* $(,)?], $register:path) => {
        #[no_mangle]
        pub static PARIKSHA_MODULE: $crate::loader::ModuleSpec = $crate::loader::ModuleSpec {
            name: $name,
            dependencies: &[$($dep),*],
            register: $register,
        };
    };
    ($name:expr, $register:path) => {
        $crate::declare_module!($name, deps: [], $register);
    };
}

/// One isolated, loaded test module.
///
/// Field order is load-bearing: the registry holds code owned by the
/// libraries, so it must drop first, and the primary library must outlive
/// its dependencies' unload.
pub struct TestModule {
    registry: SuiteRegistry,
    context_id: u64,
    name: String,
    path: PathBuf,
    dependency_paths: Vec<PathBuf>,
    _dependencies: Vec<Library>,
    _primary: Library,
}

impl TestModule {
    /// Unique identifier of this load context within the process.
    pub fn context_id(&self) -> u64 {
        self.context_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Paths of every dependency artifact loaded into this context.
    pub fn dependency_paths(&self) -> &[PathBuf] {
        &self.dependency_paths
    }

    pub fn registry(&self) -> &SuiteRegistry {
        &self.registry
    }

    /// Releases the context and everything loaded within it. Never fails,
    /// even if every test in the module failed.
    pub fn unload(self) {
        drop(self);
    }
}

/// Loads test modules into isolated contexts.
pub struct ModuleLoader;

impl ModuleLoader {
    /// Loads the module at `path`, resolves its declared dependencies from
    /// the same directory, and runs its registration function.
    ///
    /// Fails with [`ParikshaError::ModuleNotFound`] if the path does not
    /// exist. Loading never touches any previously loaded module.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<TestModule, ParikshaError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ParikshaError::ModuleNotFound {
                path: path.to_path_buf(),
            });
        }

        let primary = unsafe { Library::new(path) }.map_err(|source| ParikshaError::ModuleLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let spec = Self::entry_spec(&primary, path)?;
        let name = spec.name.to_string();

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut dependencies = Vec::new();
        let mut dependency_paths = Vec::new();
        let mut visited = HashSet::new();
        Self::load_dependencies(
            base_dir,
            spec.dependencies,
            &mut visited,
            &mut dependencies,
            &mut dependency_paths,
        )?;

        let mut registry = SuiteRegistry::new();
        (spec.register)(&mut registry);

        Ok(TestModule {
            registry,
            context_id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            name,
            path: path.to_path_buf(),
            dependency_paths,
            _dependencies: dependencies,
            _primary: primary,
        })
    }

    fn entry_spec<'l>(
        library: &'l Library,
        path: &Path,
    ) -> Result<&'l ModuleSpec, ParikshaError> {
        let symbol = unsafe { library.get::<*const ModuleSpec>(ENTRY_SYMBOL) }.map_err(|_| {
            ParikshaError::MissingEntryPoint {
                path: path.to_path_buf(),
            }
        })?;
        let spec: *const ModuleSpec = *symbol;
        Ok(unsafe { &*spec })
    }

    /// Loads every declared dependency artifact found next to the module,
    /// recursing through dependencies that export their own module spec.
    /// Artifacts that are not present are skipped, matching the behavior of
    /// an optional dependency that was statically linked instead.
    fn load_dependencies(
        base_dir: &Path,
        names: &[&str],
        visited: &mut HashSet<String>,
        libraries: &mut Vec<Library>,
        paths: &mut Vec<PathBuf>,
    ) -> Result<(), ParikshaError> {
        for name in names {
            if !visited.insert(name.to_string()) {
                continue;
            }
            let Some(artifact) = Self::platform_artifact(base_dir, name) else {
                continue;
            };
            let library =
                unsafe { Library::new(&artifact) }.map_err(|source| ParikshaError::ModuleLoad {
                    path: artifact.clone(),
                    source,
                })?;
            if let Ok(spec) = Self::entry_spec(&library, &artifact) {
                let transitive = spec.dependencies;
                Self::load_dependencies(base_dir, transitive, visited, libraries, paths)?;
            }
            paths.push(artifact);
            libraries.push(library);
        }
        Ok(())
    }

    /// Resolves a dependency name to a platform-named artifact in `dir`:
    /// `lib{name}.so` on Linux, `lib{name}.dylib` on macOS, `{name}.dll` on
    /// Windows. Unix-style names are also tried on Windows hosts that built
    /// with a GNU toolchain.
    fn platform_artifact(dir: &Path, name: &str) -> Option<PathBuf> {
        let candidates = if cfg!(target_os = "windows") {
            [format!("{}.dll", name), format!("lib{}.dll", name)]
        } else if cfg!(target_os = "macos") {
            [format!("lib{}.dylib", name), format!("lib{}.so", name)]
        } else {
            [format!("lib{}.so", name), format!("{}.so", name)]
        };
        candidates
            .iter()
            .map(|file| dir.join(file))
            .find(|candidate| candidate.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_module_not_found() {
        let result = ModuleLoader::load("no/such/module.so");
        assert!(matches!(
            result,
            Err(ParikshaError::ModuleNotFound { .. })
        ));
    }

    #[test]
    fn existing_non_library_fails_to_load() {
        let result = ModuleLoader::load("Cargo.toml");
        assert!(matches!(result, Err(ParikshaError::ModuleLoad { .. })));
    }

    #[test]
    fn absent_dependency_artifact_resolves_to_none() {
        let dir = std::env::temp_dir();
        assert_eq!(
            ModuleLoader::platform_artifact(&dir, "pariksha_no_such_dep"),
            None
        );
    }

    #[test]
    fn context_ids_are_unique() {
        let a = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        let b = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        assert_ne!(a, b);
    }
}
