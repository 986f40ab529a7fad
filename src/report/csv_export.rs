//! CSV data files for the DFD report.
//!
//! Semicolon separators, quoted text fields and pt-BR decimals (comma
//! decimal separator, no digit grouping), one header row.

use rust_decimal::Decimal;

use crate::core::{Material, Responsible, format_cpf, format_phone, round_money};

pub const MATERIALS_FILE: &str = "materiais.csv";
pub const RESPONSIBLES_FILE: &str = "responsaveis.csv";

/// Columns: Código;Tipo;Descrição;Quantidade;Unidade;Valor Unitário;Valor Total
pub fn materials_csv(materials: &[Material]) -> String {
    let mut out = String::new();
    header(
        &mut out,
        &[
            "Código",
            "Tipo",
            "Descrição",
            "Quantidade",
            "Unidade",
            "Valor Unitário",
            "Valor Total",
        ],
    );
    for m in materials {
        csv_field_str(&mut out, m.code.as_deref().unwrap_or(""));
        out.push(';');
        csv_field_str(&mut out, m.kind.label());
        out.push(';');
        csv_field_str(&mut out, &m.description);
        out.push(';');
        csv_field_quantity(&mut out, m.quantity);
        out.push(';');
        csv_field_str(&mut out, &m.unit);
        out.push(';');
        csv_field_decimal(&mut out, m.unit_price);
        out.push(';');
        csv_field_decimal(&mut out, m.total());
        out.push_str("\r\n");
    }
    out
}

/// Columns: Nome;CPF;Função;Cargo;E-mail;Telefone
pub fn responsibles_csv(responsibles: &[Responsible]) -> String {
    let mut out = String::new();
    header(
        &mut out,
        &["Nome", "CPF", "Função", "Cargo", "E-mail", "Telefone"],
    );
    for r in responsibles {
        csv_field_str(&mut out, &r.name);
        out.push(';');
        csv_field_str(&mut out, &format_cpf(&r.cpf));
        out.push(';');
        csv_field_str(&mut out, r.role.label());
        out.push(';');
        csv_field_str(&mut out, r.position.as_deref().unwrap_or(""));
        out.push(';');
        csv_field_str(&mut out, r.email.as_deref().unwrap_or(""));
        out.push(';');
        csv_field_str(&mut out, &r.phone.as_deref().map(format_phone).unwrap_or_default());
        out.push_str("\r\n");
    }
    out
}

fn header(out: &mut String, columns: &[&str]) {
    for (i, c) in columns.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        csv_field_str(out, c);
    }
    out.push_str("\r\n");
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    // Escape internal double quotes
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

fn csv_field_decimal(out: &mut String, d: Decimal) {
    let s = format!("{:.2}", round_money(d));
    out.push_str(&s.replace('.', ","));
}

/// Quantities keep their own precision, without trailing zeros.
fn csv_field_quantity(out: &mut String, d: Decimal) {
    out.push_str(&d.normalize().to_string().replace('.', ","));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MaterialBuilder, ResponsibleBuilder, ResponsibleRole};
    use rust_decimal_macros::dec;

    #[test]
    fn materials_rows() {
        let m = MaterialBuilder::new("Papel \"A4\"", dec!(2.50), "CX", dec!(1234.5))
            .code("CATMAT-1")
            .build();
        let csv = materials_csv(&[m]);
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(
            lines[0],
            concat!(
                "\"Código\";\"Tipo\";\"Descrição\";\"Quantidade\";",
                "\"Unidade\";\"Valor Unitário\";\"Valor Total\""
            )
        );
        assert_eq!(
            lines[1],
            "\"CATMAT-1\";\"Material\";\"Papel \"\"A4\"\"\";2,5;\"CX\";1234,50;3086,25"
        );
    }

    #[test]
    fn responsible_rows_are_formatted() {
        let r = ResponsibleBuilder::new("Ana Lima", "52998224725", ResponsibleRole::Inspector)
            .phone("88999999999")
            .build();
        let csv = responsibles_csv(&[r]);
        assert!(csv.contains(
            "\"Ana Lima\";\"529.982.247-25\";\"Fiscal\";\"\";\"\";\"(88) 99999-9999\"\r\n"
        ));
    }
}
