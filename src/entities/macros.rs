//! Macro for reducing boilerplate when defining entities
//!
//! Generates the struct, its `Entity` and `Storable` implementations and the
//! dynamic field access needed by the repository and envelope layers.

/// Define an entity type exposed through the REST layer.
///
/// Takes the type name, singular and plural resource names, the searchable
/// fields, and the custom fields beyond the base set (id, name, created_at,
/// updated_at, deleted_at).
///
/// # Example
/// ```rust,ignore
/// api_entity!(Product, "product", "products", ["name", "sku"], {
///     sku: String,
///     price: f64,
/// });
///
/// let product = Product::new("Drill".to_string(), "SKU-001".to_string(), 99.5);
/// ```
#[macro_export]
macro_rules! api_entity {
    ($type:ident, $singular:literal, $plural:literal, [$($searchable:literal),* $(,)?], {
        $($field:ident: $ftype:ty),* $(,)?
    }) => {
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this entity
            pub id: ::uuid::Uuid,

            /// Name of this entity
            pub name: String,

            /// When this entity was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was soft-deleted (if applicable)
            pub deleted_at: Option<::chrono::DateTime<::chrono::Utc>>,

            $(pub $field: $ftype,)*
        }

        impl $type {
            /// Create a new entity with fresh id and timestamps
            pub fn new(name: String, $($field: $ftype),*) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    name,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                    $($field,)*
                }
            }

            /// Refresh the update timestamp
            pub fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }

            fn columns() -> &'static [&'static str] {
                &["id", "name", $(stringify!($field)),*]
            }

            fn searchable_fields() -> &'static [&'static str] {
                &[$($searchable),*]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldValue::Uuid(self.id)),
                    "name" => Some($crate::core::field::FieldValue::String(self.name.clone())),
                    "created_at" => Some($crate::core::field::FieldValue::DateTime(self.created_at)),
                    "updated_at" => Some($crate::core::field::FieldValue::DateTime(self.updated_at)),
                    "deleted_at" => Some(match self.deleted_at {
                        Some(ts) => $crate::core::field::FieldValue::DateTime(ts),
                        None => $crate::core::field::FieldValue::Null,
                    }),
                    $(
                        stringify!($field) => ::serde_json::to_value(&self.$field)
                            .ok()
                            .as_ref()
                            .and_then($crate::core::field::FieldValue::from_json),
                    )*
                    _ => None,
                }
            }
        }

        impl $crate::core::entity::Storable for $type {
            fn from_fields(fields: &::serde_json::Value) -> ::anyhow::Result<Self> {
                let name: String = $crate::entities::required_field(fields, "name")?;
                $(
                    let $field: $ftype = $crate::entities::required_field(fields, stringify!($field))?;
                )*
                Ok(Self::new(name, $($field),*))
            }

            fn apply_fields(&mut self, fields: &::serde_json::Value) -> ::anyhow::Result<()> {
                if let Some(value) = fields.get("name") {
                    self.name = $crate::entities::typed_field(value, "name")?;
                }
                $(
                    if let Some(value) = fields.get(stringify!($field)) {
                        self.$field = $crate::entities::typed_field(value, stringify!($field))?;
                    }
                )*
                self.touch();
                Ok(())
            }

            fn soft_delete(&mut self) {
                self.deleted_at = Some(::chrono::Utc::now());
                self.touch();
            }

            fn restore_deleted(&mut self) {
                self.deleted_at = None;
                self.touch();
            }
        }
    };
}
