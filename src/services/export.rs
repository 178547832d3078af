//! Renders the export fan-out into a SpreadsheetML 2003 workbook. The
//! format is plain XML, opens in Excel and LibreOffice, and supports the
//! per-row fill colors that make the tag groups readable.

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use crate::catalog::export::ExportRow;

const SS_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Builds the workbook XML from the header row plus the fanned-out rows.
pub fn render_workbook(headers: &[&str], rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::PI(BytesPI::new(
        "mso-application progid=\"Excel.Sheet\"",
    )))?;

    let mut workbook = BytesStart::new("Workbook");
    workbook.push_attribute(("xmlns", SS_NS));
    workbook.push_attribute(("xmlns:ss", SS_NS));
    writer.write_event(Event::Start(workbook))?;

    write_styles(&mut writer, rows)?;

    let mut worksheet = BytesStart::new("Worksheet");
    worksheet.push_attribute(("ss:Name", "Export"));
    writer.write_event(Event::Start(worksheet))?;
    writer.write_event(Event::Start(BytesStart::new("Table")))?;

    writer.write_event(Event::Start(BytesStart::new("Row")))?;
    for header in headers {
        write_cell(&mut writer, Some("header"), header)?;
    }
    writer.write_event(Event::End(BytesEnd::new("Row")))?;

    for row in rows {
        writer.write_event(Event::Start(BytesStart::new("Row")))?;
        let style = format!("c{}", row.color);
        for cell in &row.cells {
            write_cell(&mut writer, Some(&style), cell)?;
        }
        writer.write_event(Event::End(BytesEnd::new("Row")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Table")))?;
    writer.write_event(Event::End(BytesEnd::new("Worksheet")))?;
    writer.write_event(Event::End(BytesEnd::new("Workbook")))?;

    Ok(writer.into_inner())
}

/// One style per distinct row color, plus the bold header style.
fn write_styles(writer: &mut Writer<Vec<u8>>, rows: &[ExportRow]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("Styles")))?;

    let mut header_style = BytesStart::new("Style");
    header_style.push_attribute(("ss:ID", "header"));
    writer.write_event(Event::Start(header_style))?;
    let mut font = BytesStart::new("Font");
    font.push_attribute(("ss:Bold", "1"));
    writer.write_event(Event::Empty(font))?;
    writer.write_event(Event::End(BytesEnd::new("Style")))?;

    let mut seen: Vec<&str> = Vec::new();
    for row in rows {
        if seen.contains(&row.color.as_str()) {
            continue;
        }
        seen.push(&row.color);

        let mut style = BytesStart::new("Style");
        let id = format!("c{}", row.color);
        style.push_attribute(("ss:ID", id.as_str()));
        writer.write_event(Event::Start(style))?;

        let mut interior = BytesStart::new("Interior");
        let color = format!("#{}", row.color);
        interior.push_attribute(("ss:Color", color.as_str()));
        interior.push_attribute(("ss:Pattern", "Solid"));
        writer.write_event(Event::Empty(interior))?;

        let mut font = BytesStart::new("Font");
        font.push_attribute(("ss:Color", "#FFFFFF"));
        writer.write_event(Event::Empty(font))?;

        writer.write_event(Event::End(BytesEnd::new("Style")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Styles")))?;
    Ok(())
}

fn write_cell(writer: &mut Writer<Vec<u8>>, style: Option<&str>, text: &str) -> Result<()> {
    let mut cell = BytesStart::new("Cell");
    if let Some(style) = style {
        cell.push_attribute(("ss:StyleID", style));
    }
    writer.write_event(Event::Start(cell))?;

    let mut data = BytesStart::new("Data");
    data.push_attribute(("ss:Type", "String"));
    writer.write_event(Event::Start(data))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("Data")))?;

    writer.write_event(Event::End(BytesEnd::new("Cell")))?;
    Ok(())
}
