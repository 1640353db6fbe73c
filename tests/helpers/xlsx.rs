//! Read parts of a written `.xlsx` back for assertions

use std::io::Read;
use std::path::Path;

/// Uncompressed XML of one archive member, e.g. `xl/workbook.xml`
pub fn read_xlsx_part(path: &Path, part: &str) -> String {
    let file = std::fs::File::open(path).expect("Failed to open workbook");
    let mut archive = zip::ZipArchive::new(file).expect("Workbook is not a zip archive");
    let mut member = archive.by_name(part).expect("Workbook part missing");
    let mut xml = String::new();
    member.read_to_string(&mut xml).expect("Workbook part is not UTF-8");
    xml
}

/// The `<c r="..">` element for `cell` in a worksheet's XML
pub fn cell_xml<'a>(sheet_xml: &'a str, cell: &str) -> Option<&'a str> {
    let start = sheet_xml.find(&format!("<c r=\"{}\"", cell))?;
    let rest = &sheet_xml[start..];
    let end = rest.find("</c>").or_else(|| rest.find("/>"))?;
    Some(&rest[..end])
}
