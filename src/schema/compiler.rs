//! Schema compiler
//!
//! Walks a field-definition map and produces a [`CompiledSchema`]: nested
//! objects, tuples and arrays-of-objects are flattened into leaf
//! [`CompiledField`]s with dotted logical paths, storage keys and search
//! paths resolved per the precedence rules (`field` > `alias` > name for
//! storage keys, explicit `path` > derived `$.`-path for search paths).
//!
//! Compilation is a pure function of its inputs: the same definitions and
//! options always yield the same compiled output, byte for byte. The index
//! fingerprint depends on this.

use crate::schema::{
    CompiledField, CompiledSchema, DataStructure, FieldDefinition, FieldType, SchemaError,
    SchemaOptions, SchemaResult, SchemaWarning, StopWordsMode, WarningHandler,
    BOOLEAN_SEPARATOR,
};
use std::collections::HashMap;

/// Compile a schema from its name, field definitions and options
///
/// Field declaration order is preserved in the compiled output and in the
/// emitted index definition.
///
/// # Errors
///
/// Returns [`SchemaError`] when a definition is malformed: empty names,
/// duplicate logical paths, empty naming overrides, object/tuple fields
/// without children, vector fields without parameters, or field types the
/// selected storage structure cannot hold.
pub fn compile(
    name: &str,
    fields: Vec<(String, FieldDefinition)>,
    options: SchemaOptions,
) -> SchemaResult<CompiledSchema> {
    if name.is_empty() {
        return Err(SchemaError::EmptySchemaName);
    }

    let prefix = match options.prefix {
        Some(p) if p.is_empty() => return Err(SchemaError::EmptyPrefix),
        Some(p) => p,
        None => name.to_string(),
    };
    let index_name = match options.index_name {
        Some(n) if n.is_empty() => return Err(SchemaError::EmptyIndexName),
        Some(n) => n,
        None => format!("{prefix}:index"),
    };
    let index_hash_name = match options.index_hash_name {
        Some(n) if n.is_empty() => return Err(SchemaError::EmptyIndexHashName),
        Some(n) => n,
        None => format!("{prefix}:index:hash"),
    };
    if options.stop_words_mode == StopWordsMode::Custom && options.stop_words.is_empty() {
        return Err(SchemaError::EmptyStopWords);
    }

    let mut compiler = Compiler {
        structure: options.data_structure,
        on_warning: options.on_warning,
        warnings: Vec::new(),
        out: Vec::new(),
        by_path: HashMap::new(),
    };

    let root = PathCtx::root();
    for (field_name, def) in &fields {
        compiler.compile_field(&root, field_name, def)?;
    }

    Ok(CompiledSchema {
        name: name.to_string(),
        data_structure: options.data_structure,
        prefix,
        index_name,
        index_hash_name,
        fields: compiler.out,
        by_path: compiler.by_path,
        definitions: fields,
        stop_words_mode: options.stop_words_mode,
        stop_words: options.stop_words,
        id_strategy: options.id_strategy,
        warnings: compiler.warnings,
    })
}

/// Path state accumulated while descending into nested definitions
#[derive(Clone)]
struct PathCtx {
    /// Dotted logical path so far (empty at the root)
    logical: String,
    /// Dotted storage-key path so far
    storage: String,
    /// Underscore-joined alias path so far
    alias: String,
    /// JSON path so far (`$` at the root)
    json: String,
}

impl PathCtx {
    fn root() -> Self {
        Self {
            logical: String::new(),
            storage: String::new(),
            alias: String::new(),
            json: "$".to_string(),
        }
    }

    fn join(prefix: &str, segment: &str, sep: char) -> String {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}{sep}{segment}")
        }
    }

    /// Child context for a named member (objects and top-level fields)
    fn child(&self, name: &str, def: &FieldDefinition) -> Self {
        let storage_seg = def
            .field
            .as_deref()
            .or(def.alias.as_deref())
            .unwrap_or(name);
        let alias_seg = def.alias.as_deref().unwrap_or(name);
        Self {
            logical: Self::join(&self.logical, name, '.'),
            storage: Self::join(&self.storage, storage_seg, '.'),
            alias: Self::join(&self.alias, alias_seg, '_'),
            json: format!("{}.{}", self.json, name),
        }
    }

    /// Child context for a tuple element at the given position
    fn element(&self, index: usize, def: &FieldDefinition) -> Self {
        let index_str = index.to_string();
        let storage_seg = def
            .field
            .clone()
            .or_else(|| def.alias.clone())
            .unwrap_or_else(|| index_str.clone());
        let alias_seg = def.alias.clone().unwrap_or_else(|| index_str.clone());
        Self {
            logical: Self::join(&self.logical, &index_str, '.'),
            storage: Self::join(&self.storage, &storage_seg, '.'),
            alias: Self::join(&self.alias, &alias_seg, '_'),
            json: format!("{}[{}]", self.json, index),
        }
    }

    /// Context whose JSON path selects every element of an array field
    fn spread(mut self) -> Self {
        self.json.push_str("[*]");
        self
    }
}

struct Compiler {
    structure: DataStructure,
    on_warning: Option<WarningHandler>,
    warnings: Vec<SchemaWarning>,
    out: Vec<CompiledField>,
    by_path: HashMap<String, usize>,
}

impl Compiler {
    fn compile_field(
        &mut self,
        parent: &PathCtx,
        name: &str,
        def: &FieldDefinition,
    ) -> SchemaResult<()> {
        if name.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        let ctx = parent.child(name, def);

        match def.field_type {
            FieldType::Object => {
                if def.properties.is_empty() {
                    return Err(SchemaError::MissingProperties {
                        field: ctx.logical,
                        field_type: FieldType::Object,
                    });
                }
                for (prop_name, prop) in &def.properties {
                    self.compile_field(&ctx, prop_name, prop)?;
                }
                Ok(())
            }
            FieldType::Array => {
                if self.structure == DataStructure::Hash {
                    return Err(SchemaError::UnsupportedInStructure {
                        field: ctx.logical,
                        field_type: FieldType::Array,
                        structure: self.structure,
                    });
                }
                if def.properties.is_empty() {
                    return Err(SchemaError::MissingProperties {
                        field: ctx.logical,
                        field_type: FieldType::Array,
                    });
                }
                let ctx = ctx.spread();
                for (prop_name, prop) in &def.properties {
                    self.compile_field(&ctx, prop_name, prop)?;
                }
                Ok(())
            }
            FieldType::Tuple => {
                if def.elements.is_empty() {
                    return Err(SchemaError::MissingElements { field: ctx.logical });
                }
                for (i, element) in def.elements.iter().enumerate() {
                    self.compile_element(&ctx, i, element)?;
                }
                Ok(())
            }
            _ => self.push_leaf(ctx, def),
        }
    }

    /// Compile one positional tuple element
    fn compile_element(
        &mut self,
        tuple_ctx: &PathCtx,
        index: usize,
        def: &FieldDefinition,
    ) -> SchemaResult<()> {
        let ctx = tuple_ctx.element(index, def);
        match def.field_type {
            FieldType::Object => {
                if def.properties.is_empty() {
                    return Err(SchemaError::MissingProperties {
                        field: ctx.logical,
                        field_type: FieldType::Object,
                    });
                }
                for (prop_name, prop) in &def.properties {
                    self.compile_field(&ctx, prop_name, prop)?;
                }
                Ok(())
            }
            FieldType::Tuple => {
                if def.elements.is_empty() {
                    return Err(SchemaError::MissingElements { field: ctx.logical });
                }
                for (i, element) in def.elements.iter().enumerate() {
                    self.compile_element(&ctx, i, element)?;
                }
                Ok(())
            }
            FieldType::Array => Err(SchemaError::UnsupportedInStructure {
                field: ctx.logical,
                field_type: FieldType::Array,
                structure: self.structure,
            }),
            _ => self.push_leaf(ctx, def),
        }
    }

    fn push_leaf(&mut self, ctx: PathCtx, def: &FieldDefinition) -> SchemaResult<()> {
        if def.field_type == FieldType::Vector {
            if self.structure == DataStructure::Hash {
                return Err(SchemaError::UnsupportedInStructure {
                    field: ctx.logical,
                    field_type: FieldType::Vector,
                    structure: self.structure,
                });
            }
            if def.vector.is_none() {
                return Err(SchemaError::MissingVectorParams { field: ctx.logical });
            }
        }

        // RediSearch disallows SORTABLE on a TAG field under JSON; drop the
        // flag and raise a warning instead of failing.
        let mut sortable = def.sortable;
        if sortable
            && self.structure == DataStructure::Json
            && def.field_type == FieldType::String
        {
            self.warn(SchemaWarning::SortableTagIgnored {
                field: ctx.logical.clone(),
            });
            sortable = false;
        }

        let search_path = match self.structure {
            DataStructure::Hash => ctx.storage.clone(),
            DataStructure::Json => match &def.path {
                Some(path) => path.clone(),
                None if def.field_type == FieldType::StringArray => format!("{}[*]", ctx.json),
                None => ctx.json.clone(),
            },
        };

        let separator = if def.field_type == FieldType::Boolean {
            BOOLEAN_SEPARATOR
        } else {
            def.separator
        };

        let field = CompiledField {
            logical_path: ctx.logical,
            storage_key: ctx.storage,
            search_path,
            search_alias: ctx.alias,
            field_type: def.field_type,
            indexed: def.indexed,
            sortable,
            case_sensitive: def.case_sensitive,
            normalized: def.normalized,
            stemming: def.stemming,
            separator,
            matcher: def.matcher.clone(),
            weight: def.weight,
            vector: def.vector.clone(),
        };

        if self
            .by_path
            .insert(field.logical_path.clone(), self.out.len())
            .is_some()
        {
            return Err(SchemaError::DuplicateField(field.logical_path));
        }
        self.out.push(field);
        Ok(())
    }

    fn warn(&mut self, warning: SchemaWarning) {
        tracing::warn!("{}", warning);
        if let Some(handler) = self.on_warning {
            handler(&warning);
        }
        self.warnings.push(warning);
    }
}
