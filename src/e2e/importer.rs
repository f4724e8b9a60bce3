//! Symbol-import table.
//!
//! Sub-compilers request external symbols while lowering; the table hands
//! back the local alias to reference and remembers the request. Rendering
//! happens once the whole function body has been compiled, so every symbol
//! is imported exactly once per output file.

use std::collections::{BTreeMap, HashMap};

use super::ast::{Expr, TypeNode};

/// How a symbol is brought into scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportKind {
    /// `import name from "lib"`
    Default,
    /// `import { name } from "lib"`
    Named,
    /// `import type { name } from "lib"`
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct ImportKey {
    library: String,
    kind: ImportKind,
    name: String,
}

/// Per-file import table. Never shared across compilations.
#[derive(Debug, Default)]
pub struct Importer {
    aliases: HashMap<ImportKey, String>,
    /// Request order, for deterministic aliasing
    order: Vec<ImportKey>,
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` from `library` and return the identifier to use.
    ///
    /// The alias is the symbol name itself unless an earlier, different import
    /// already took that local name, in which case `name_1`, `name_2`, ... is
    /// used.
    pub fn external(&mut self, library: &str, kind: ImportKind, name: &str) -> String {
        let key = ImportKey {
            library: library.to_string(),
            kind,
            name: name.to_string(),
        };
        if let Some(alias) = self.aliases.get(&key) {
            return alias.clone();
        }

        let mut alias = name.to_string();
        let mut n = 1;
        while self.aliases.values().any(|taken| *taken == alias) {
            alias = format!("{}_{}", name, n);
            n += 1;
        }
        self.aliases.insert(key.clone(), alias.clone());
        self.order.push(key);
        alias
    }

    /// Expression referencing an imported value.
    pub fn value(&mut self, library: &str, kind: ImportKind, name: &str) -> Expr {
        Expr::Ident(self.external(library, kind, name))
    }

    /// Type node referencing a type-only import. Dotted names import their
    /// root (`IShoppingSale.ICreate` imports `IShoppingSale`).
    pub fn type_reference(&mut self, library: &str, type_name: &str) -> TypeNode {
        let (root, rest) = match type_name.split_once('.') {
            Some((root, rest)) => (root, Some(rest)),
            None => (type_name, None),
        };
        let alias = self.external(library, ImportKind::Type, root);
        match rest {
            Some(rest) => TypeNode::Ref(format!("{}.{}", alias, rest)),
            None => TypeNode::Ref(alias),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Render import declarations, one value import and one type import per
    /// library, libraries sorted by name.
    pub fn to_statements(&self) -> Vec<String> {
        let mut libraries: BTreeMap<&str, Vec<&ImportKey>> = BTreeMap::new();
        for key in &self.order {
            libraries.entry(key.library.as_str()).or_default().push(key);
        }

        let mut lines = Vec::new();
        for (library, keys) in libraries {
            let specifier = |key: &ImportKey| {
                let alias = &self.aliases[key];
                if *alias == key.name {
                    alias.clone()
                } else {
                    format!("{} as {}", key.name, alias)
                }
            };

            let default = keys
                .iter()
                .find(|k| k.kind == ImportKind::Default)
                .map(|k| self.aliases[*k].clone());
            let mut named: Vec<String> = keys
                .iter()
                .filter(|k| k.kind == ImportKind::Named)
                .map(|k| specifier(k))
                .collect();
            named.sort();
            let mut types: Vec<String> = keys
                .iter()
                .filter(|k| k.kind == ImportKind::Type)
                .map(|k| specifier(k))
                .collect();
            types.sort();

            let mut clauses = Vec::new();
            if let Some(default) = default {
                clauses.push(default);
            }
            if !named.is_empty() {
                clauses.push(format!("{{ {} }}", named.join(", ")));
            }
            if !clauses.is_empty() {
                lines.push(format!("import {} from \"{}\";", clauses.join(", "), library));
            }
            if !types.is_empty() {
                lines.push(format!(
                    "import type {{ {} }} from \"{}\";",
                    types.join(", "),
                    library
                ));
            }
        }
        lines
    }
}
