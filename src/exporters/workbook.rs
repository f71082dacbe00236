use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::models::AppError;

use super::sheets::{Cell, Sheet};

const XML_PROLOG: &[u8] =
    b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<?mso-application progid=\"Excel.Sheet\"?>\n";
const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";
const HEADER_STYLE: &str = "header";
const DATA_STYLE: &str = "data";
// 1文字あたりの列幅（pt）
const POINTS_PER_CHAR: f64 = 7.0;

/// シートを Excel で開ける XML スプレッドシート（SpreadsheetML）に書き出す
///
/// ヘッダーは太字20pt・白文字・青背景、データは中央揃え、全セルに細罫線。
pub fn write_workbook(sheets: &[Sheet]) -> Result<Vec<u8>, AppError> {
    let mut out = SheetXml::new();

    out.raw(XML_PROLOG)?;
    out.start("Workbook", &[("xmlns", SPREADSHEET_NS), ("xmlns:ss", SPREADSHEET_NS)])?;

    write_styles(&mut out)?;
    for sheet in sheets {
        write_sheet(&mut out, sheet)?;
    }

    out.end("Workbook")?;
    Ok(out.into_inner())
}

fn write_styles(out: &mut SheetXml) -> Result<(), AppError> {
    out.start("Styles", &[])?;

    out.start("Style", &[("ss:ID", HEADER_STYLE)])?;
    write_alignment_and_borders(out)?;
    out.empty(
        "Font",
        &[("ss:Bold", "1"), ("ss:Size", "20"), ("ss:Color", "#FFFFFF")],
    )?;
    out.empty("Interior", &[("ss:Color", "#0070C0"), ("ss:Pattern", "Solid")])?;
    out.end("Style")?;

    out.start("Style", &[("ss:ID", DATA_STYLE)])?;
    write_alignment_and_borders(out)?;
    out.end("Style")?;

    out.end("Styles")
}

fn write_alignment_and_borders(out: &mut SheetXml) -> Result<(), AppError> {
    out.empty(
        "Alignment",
        &[("ss:Horizontal", "Center"), ("ss:Vertical", "Center")],
    )?;
    out.start("Borders", &[])?;
    for position in ["Top", "Bottom", "Left", "Right"] {
        out.empty(
            "Border",
            &[
                ("ss:Position", position),
                ("ss:LineStyle", "Continuous"),
                ("ss:Weight", "1"),
                ("ss:Color", "#000000"),
            ],
        )?;
    }
    out.end("Borders")
}

fn write_sheet(out: &mut SheetXml, sheet: &Sheet) -> Result<(), AppError> {
    out.start("Worksheet", &[("ss:Name", sheet.name)])?;
    out.start("Table", &[])?;

    for width in sheet.column_widths() {
        let points = format!("{:.1}", width as f64 * POINTS_PER_CHAR);
        out.empty("Column", &[("ss:Width", points.as_str())])?;
    }

    out.start("Row", &[])?;
    for header in &sheet.headers {
        write_cell(out, HEADER_STYLE, &Cell::Text(header.to_string()))?;
    }
    out.end("Row")?;

    for row in &sheet.rows {
        out.start("Row", &[])?;
        for cell in row {
            write_cell(out, DATA_STYLE, cell)?;
        }
        out.end("Row")?;
    }

    out.end("Table")?;
    out.end("Worksheet")
}

fn write_cell(out: &mut SheetXml, style: &str, cell: &Cell) -> Result<(), AppError> {
    let kind = match cell {
        Cell::Text(_) => "String",
        Cell::Number(_) => "Number",
    };

    out.start("Cell", &[("ss:StyleID", style)])?;
    out.start("Data", &[("ss:Type", kind)])?;
    out.text(&cell.display())?;
    out.end("Data")?;
    out.end("Cell")
}

struct SheetXml {
    writer: Writer<Vec<u8>>,
}

impl SheetXml {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 1),
        }
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<(), AppError> {
        self.writer.get_mut().write_all(bytes).map_err(AppError::from)
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), AppError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Start(element))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), AppError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> Result<(), AppError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<(), AppError> {
        self.write(Event::Text(BytesText::new(text)))
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), AppError> {
        self.writer
            .write_event(event)
            .map_err(|err| AppError::new(format!("ワークブックの書き込みに失敗しました: {err}")))
    }

    fn into_inner(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> Sheet {
        Sheet {
            name: "표준BOM",
            headers: vec!["LEVEL", "품목그룹명", "규격", "수량"],
            rows: vec![vec![
                Cell::Text("L3".to_string()),
                Cell::Text("MIXER / <BLADE> & CO".to_string()),
                Cell::Text("SUS304, T10".to_string()),
                Cell::Number(2),
            ]],
        }
    }

    #[test]
    fn test_write_workbook_structure() {
        let bytes = write_workbook(&[sample_sheet()]).unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<?mso-application progid=\"Excel.Sheet\"?>"));
        assert!(xml.contains("<Worksheet ss:Name=\"표준BOM\">"));
        assert!(xml.contains("ss:Color=\"#0070C0\""));
        assert!(xml.contains("<Data ss:Type=\"Number\">2</Data>"));
        assert_eq!(xml.matches("<Row>").count(), 2);
    }

    #[test]
    fn test_write_workbook_escapes_text() {
        let xml = String::from_utf8(write_workbook(&[sample_sheet()]).unwrap()).unwrap();
        assert!(xml.contains("MIXER / &lt;BLADE&gt; &amp; CO"));
    }
}
