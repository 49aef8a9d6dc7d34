//! Declaración del schema
//!
//! Única fuente de verdad para las tablas: de aquí salen el DDL que se
//! ejecuta al arrancar y los INSERT del store PostgreSQL. Los tests verifican
//! que los payloads de creación tienen exactamente las columnas no asignadas
//! por el servidor.

/// Columna de una tabla
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// Nombre en la base de datos (snake_case)
    pub name: &'static str,
    /// Nombre del campo en JSON (camelCase)
    pub field: &'static str,
    pub sql_type: &'static str,
    pub constraints: &'static str,
    /// `id` y `created_at` los asigna el servidor
    pub server_assigned: bool,
    /// La genera PostgreSQL; no aparece en los INSERT ni en el JSON
    pub generated: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

const fn column(
    name: &'static str,
    field: &'static str,
    sql_type: &'static str,
    constraints: &'static str,
    server_assigned: bool,
) -> ColumnDef {
    ColumnDef { name, field, sql_type, constraints, server_assigned, generated: false }
}

/// Secuencia de inserción; desempata filas con el mismo `created_at`
const fn sequence(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        field: "",
        sql_type: "BIGSERIAL",
        constraints: "NOT NULL",
        server_assigned: true,
        generated: true,
    }
}

pub const USERS: TableDef = TableDef {
    name: "users",
    columns: &[
        column("id", "id", "UUID", "PRIMARY KEY", true),
        column("name", "name", "TEXT", "NOT NULL", false),
        column("phone", "phone", "TEXT", "NOT NULL UNIQUE", false),
        column("created_at", "createdAt", "TIMESTAMPTZ", "NOT NULL DEFAULT NOW()", true),
    ],
};

pub const ROUTES: TableDef = TableDef {
    name: "routes",
    columns: &[
        column("id", "id", "UUID", "PRIMARY KEY", true),
        column("number", "number", "TEXT", "NOT NULL", false),
        column("from_location", "fromLocation", "TEXT", "NOT NULL", false),
        column("to_location", "toLocation", "TEXT", "NOT NULL", false),
        column("duration", "duration", "TEXT", "NOT NULL", false),
        column("distance", "distance", "TEXT", "NOT NULL", false),
        column("seats", "seats", "TEXT", "NOT NULL", false),
        column("status", "status", "TEXT", "NOT NULL", false),
        column("category", "category", "JSONB", "NOT NULL", false),
        column("created_at", "createdAt", "TIMESTAMPTZ", "NOT NULL DEFAULT NOW()", true),
        sequence("seq"),
    ],
};

pub const USER_FAVORITES: TableDef = TableDef {
    name: "user_favorites",
    columns: &[
        column("id", "id", "UUID", "PRIMARY KEY", true),
        column("user_id", "userId", "UUID", "NOT NULL REFERENCES users(id)", false),
        column("route_id", "routeId", "UUID", "NOT NULL REFERENCES routes(id)", false),
        column("created_at", "createdAt", "TIMESTAMPTZ", "NOT NULL DEFAULT NOW()", true),
        sequence("seq"),
    ],
};

/// Orden de creación: las tablas referenciadas van primero
pub const ALL_TABLES: [TableDef; 3] = [USERS, ROUTES, USER_FAVORITES];

impl TableDef {
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("    {} {} {}", c.name, c.sql_type, c.constraints))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n)", self.name, columns)
    }

    /// Añade las columnas generadas a tablas creadas antes de que existieran
    pub fn upgrade_statements(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.generated)
            .map(|c| {
                format!(
                    "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {} {}",
                    self.name, c.name, c.sql_type, c.constraints
                )
            })
            .collect()
    }

    /// INSERT con las columnas no generadas en orden de declaración, `$1..$n`
    pub fn insert_statement(&self) -> String {
        let inserted: Vec<&ColumnDef> = self.columns.iter().filter(|c| !c.generated).collect();
        let names = inserted.iter().map(|c| c.name).collect::<Vec<_>>().join(", ");
        let params = (1..=inserted.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!("INSERT INTO {} ({}) VALUES ({}) RETURNING *", self.name, names, params)
    }

    /// Campos JSON que el cliente debe enviar al crear
    pub fn payload_fields(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| !c.server_assigned && !c.generated)
            .map(|c| c.field)
            .collect()
    }
}
