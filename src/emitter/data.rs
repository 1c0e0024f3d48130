use std::collections::HashMap;

use crate::{
    ast::{DataKind, Node, Program},
    translator::translate_literal,
};

use super::{EmitConfig, GENERATED_HEADER};

/// Name of the tables that have no label before them.
pub const UNKNOWN_DATA: &str = "UnknownData";

/// Consecutive data blocks under the same label, loaded as one array.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DataTable {
    pub name: String,
    pub kind: DataKind,
    /// Values already translated to host syntax
    pub values: Vec<String>,
}

impl DataTable {
    /// Number of elements in the table, which is what the pointer layout advances by.
    pub fn element_count(&self) -> usize {
        self.values.len()
    }

    fn element_type(&self) -> &'static str {
        match self.kind {
            DataKind::Bytes => "uint8_t",
            DataKind::Words => "uint16_t",
        }
    }
}

/// Collect the data tables of a program in source order.
///
/// A table is named after the nearest label before it. Data separated by code or of a
/// different kind starts a new table, which gets a numeric suffix when its name is taken.
pub fn collect_tables(program: &Program) -> Vec<DataTable> {
    let mut tables: Vec<DataTable> = vec![];
    let mut uses: HashMap<&str, usize> = HashMap::new();
    let mut label: &str = UNKNOWN_DATA;
    let mut open = false;

    for record in program.records() {
        match &record.node {
            Node::Label(name) => {
                label = name.as_str();
                open = false;
            }
            Node::Data(data) => {
                let values = data
                    .values
                    .iter()
                    .filter(|value| !value.is_empty())
                    .map(|value| translate_literal(value));
                let continues = open && tables.last().map_or(false, |t| t.kind == data.kind);
                if continues {
                    if let Some(table) = tables.last_mut() {
                        table.values.extend(values);
                    }
                    continue;
                }

                let taken = uses.entry(label).or_insert(0);
                let name = match *taken {
                    0 => label.to_owned(),
                    n => format!("{}_{}", label, n),
                };
                *taken += 1;
                tables.push(DataTable {
                    name,
                    kind: data.kind,
                    values: values.collect(),
                });
                open = true;
            }
            Node::Comment => {}
            _ => open = false,
        }
    }

    tables
}

/// Generate the `loadConstantData()` body with one array per table.
pub fn generate_data(tables: &[DataTable], config: &EmitConfig) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str(&format!("#include \"{}.hpp\"\n\n", config.prefix));
    out.push_str(&format!("void {}::loadConstantData()\n{{\n", config.engine()));

    for table in tables {
        out.push_str(&format!("    // {}\n", table.name));
        out.push_str(&format!(
            "    const {} {}_data[] = {{\n        {}\n    }};\n",
            table.element_type(),
            table.name,
            table.values.join(", ")
        ));
        out.push_str(&format!(
            "    writeData({0}, {0}_data, sizeof({0}_data));\n\n",
            table.name
        ));
    }

    out.push_str("}\n");
    out
}

/// Generate the struct holding the load address of every table.
///
/// Tables get sequential addresses from the base address, each one advancing the next by its
/// element count. The address after the last table is kept in `freeSpaceAddress`.
pub fn generate_pointers(tables: &[DataTable], config: &EmitConfig) -> String {
    let name = config.pointers();
    let guard = format!("{}_HPP", name.to_uppercase());

    let mut fields = String::new();
    let mut defaults = String::new();
    let mut address = usize::from(config.base_address);
    for table in tables {
        fields.push_str(&format!("    uint16_t {}_ptr;\n", table.name));
        defaults.push_str(&format!(
            "        this->{}_ptr = 0x{:x};\n",
            table.name, address
        ));
        address += table.element_count();
    }
    fields.push_str("    uint16_t freeSpaceAddress;\n");
    defaults.push_str(&format!(
        "        this->freeSpaceAddress = 0x{:x};\n",
        address
    ));

    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str(&format!("#ifndef {0}\n#define {0}\n\n", guard));
    out.push_str(&format!("struct {}\n{{\n", name));
    out.push_str(&fields);
    out.push_str(&format!("\n    {}()\n    {{\n", name));
    out.push_str(&defaults);
    out.push_str("    }\n};\n\n");
    out.push_str(&format!("#endif // {}\n", guard));
    out
}
