/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Returned Cursor cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use minixml::Cursor;
/// use minixml::Document;
/// let c: Cursor;
/// {
///     let doc: Document = "<a><b/></a>".parse()?;
///     c = doc.root().find_tag("a");
/// }
/// println!("{}", c);
/// # Ok(())
/// # }
/// ```
///
/// Document cannot be edited while a Cursor is alive:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use minixml::Document;
/// let mut doc: Document = "<a><b/></a>".parse()?;
/// let a = doc.find_tag("a");
/// let id = a.find_tag("b").id().unwrap();
/// doc.remove(id)?;
/// println!("{}", a);
/// # Ok(())
/// # }
/// ```
///
/// Attribute references cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use minixml::Document;
/// let value: &str;
/// {
///     let doc: Document = "<a x='1'/>".parse()?;
///     value = doc.find_tag("a").attribute("x").unwrap_or("");
/// }
/// println!("{}", value);
/// # Ok(())
/// # }
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
