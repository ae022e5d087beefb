use crate::error::{ProposalError, Result};
use crate::types::{CellValue, ClientInfo, Row};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Rows read from disk plus the optional client block of a request payload.
#[derive(Debug, Clone, Default)]
pub struct LoadedInput {
    pub cliente: Option<ClientInfo>,
    pub rows: Vec<Row>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Rows(Vec<Row>),
    Request {
        #[serde(default)]
        cliente: Option<ClientInfo>,
        dados_completos: Vec<Row>,
    },
}

/// Load spreadsheet rows from a `.json` or `.csv` file.
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<LoadedInput> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let input = match ext.as_deref() {
        Some("json") => parse_json_rows(&std::fs::read_to_string(path)?)?,
        Some("csv") => LoadedInput { cliente: None, rows: read_csv_rows(std::fs::File::open(path)?)? },
        _ => return Err(ProposalError::UnsupportedInput(path.to_path_buf())),
    };
    info!(path = %path.display(), rows = input.rows.len(), "loaded spreadsheet rows");
    Ok(input)
}

/// Accepts a bare array of rows or a `{ "cliente": ..., "dados_completos": [...] }`
/// request body.
pub fn parse_json_rows(s: &str) -> Result<LoadedInput> {
    let input = match serde_json::from_str::<JsonPayload>(s)? {
        JsonPayload::Rows(rows) => LoadedInput { cliente: None, rows },
        JsonPayload::Request { cliente, dados_completos } => LoadedInput { cliente, rows: dados_completos },
    };
    Ok(input)
}

/// Read a spreadsheet export with a header row. Blank cells are left out of
/// the row entirely, so a row only carries the keys of the block it belongs to.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, field)| !field.trim().is_empty())
            .map(|(key, field)| (key.to_string(), Some(CellValue::from(field))))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_parse_bare_array() {
        let input = parse_json_rows(r#"[{"Gráfico Payback": "1", "col_2": "-R$ 100,00"}, {}]"#).unwrap();
        assert!(input.cliente.is_none());
        assert_eq!(input.rows.len(), 2);
    }

    #[test]
    fn test_parse_request_payload() {
        let json = r#"{
            "cliente": {"nome": "Maria Souza", "cpf_cnpj": "123.456.789-00", "endereco": "Rua A, 10",
                        "cidade": "Goiânia - GO", "telefone": "(62) 99999-0000"},
            "dados_completos": [{"DADOS DA CONTA DE ENERGIA": "Preço do Sistema", "col_7": "R$ 25.000,00"}]
        }"#;
        let input = parse_json_rows(json).unwrap();
        assert_eq!(input.cliente.unwrap().nome, "Maria Souza");
        assert_eq!(input.rows.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_json_rows("{not json"), Err(ProposalError::Json(_))));
    }

    #[test]
    fn test_csv_blank_cells_are_absent() {
        let csv = "\
Gráfico Payback,col_2,col_3,DADOS DA CONTA DE ENERGIA,col_7
2025,\"-R$ 10.000,00\",\"R$ 300,00\",,
,,,Quantidade de módulos,12
";
        let rows = read_csv_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0].get("col_2"), Some(&Some(CellValue::from("-R$ 10.000,00"))));
        assert!(!rows[0].contains_key("col_7"));
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[1].get("col_7"), Some(&Some(CellValue::from("12"))));
    }

    #[test]
    fn test_load_rows_from_files() {
        let mut json = Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"[{{"DADOS DA CONTA DE ENERGIA": "Padrão do Cliente", "col_7": "Trifásico"}}]"#).unwrap();
        assert_eq!(load_rows(json.path()).unwrap().rows.len(), 1);

        let mut csv = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(csv, "Gráfico Payback,col_2\n1,-500\n2,250").unwrap();
        assert_eq!(load_rows(csv.path()).unwrap().rows.len(), 2);
    }

    #[test]
    fn test_load_rows_rejects_other_extensions() {
        let txt = Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(load_rows(txt.path()), Err(ProposalError::UnsupportedInput(_))));
    }
}
