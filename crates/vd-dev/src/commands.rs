//! Line commands typed into the harness.

use vd_core::model::ShapeType;
use vd_panel::{CollectionFilter, PanelEvent, ShapeEdit};

pub const HELP: &str = "\
commands:
  search <query>                          search icons (empty lists the collection)
  collection <prefix|all>                 switch icon set
  sets                                    list the featured icon sets
  insert <n>                              insert the n-th listed icon
  size <px>                               icon size (16-128)
  color <hex|off>                         recolor inserted icons
  shapes <type> <count> [w h spacing hex] create a row of rectangle/ellipse/frame
  select                                  ask for the current selection
  help                                    this text
  quit                                    close the panel";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Events(Vec<PanelEvent>),
    Sets,
    Help,
}

fn number<T: std::str::FromStr>(arg: Option<&str>, what: &str) -> Result<T, String> {
    let arg = arg.ok_or_else(|| format!("missing {what}"))?;
    arg.parse().map_err(|_| format!("{what} must be a number, got {arg:?}"))
}

/// Parse one input line. Blank lines yield no events.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let events = match word {
        "" => Vec::new(),
        "search" | "s" => vec![PanelEvent::Query(rest.to_string())],
        "collection" | "c" => vec![PanelEvent::Collection(CollectionFilter::parse(rest))],
        "insert" | "i" => vec![PanelEvent::InsertIcon(number(args.next(), "icon index")?)],
        "size" => vec![PanelEvent::SetSize(number(args.next(), "size")?)],
        "color" => match rest {
            "" | "off" => vec![PanelEvent::SetColor(None)],
            hex => vec![PanelEvent::SetColor(Some(hex.to_string()))],
        },
        "shapes" => {
            let kind = args.next().ok_or("missing shape type")?;
            let shape_type =
                ShapeType::parse(kind).ok_or_else(|| format!("unknown shape type {kind:?}"))?;
            let mut events = vec![
                PanelEvent::EditShapes(ShapeEdit::Type(shape_type)),
                PanelEvent::EditShapes(ShapeEdit::Count(number(args.next(), "count")?)),
            ];
            if let Some(w) = args.next() {
                events.push(PanelEvent::EditShapes(ShapeEdit::Width(number(Some(w), "width")?)));
                events.push(PanelEvent::EditShapes(ShapeEdit::Height(number(args.next(), "height")?)));
                events.push(PanelEvent::EditShapes(ShapeEdit::Spacing(number(args.next(), "spacing")?)));
                if let Some(hex) = args.next() {
                    events.push(PanelEvent::EditShapes(ShapeEdit::Color(hex.to_string())));
                }
            }
            events.push(PanelEvent::SubmitShapes);
            events
        }
        "select" => vec![PanelEvent::RequestSelection],
        "quit" | "q" | "exit" => vec![PanelEvent::Close],
        "sets" => return Ok(Command::Sets),
        "help" | "?" => return Ok(Command::Help),
        other => return Err(format!("unknown command {other:?} (try `help`)")),
    };
    Ok(Command::Events(events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn events(line: &str) -> Vec<PanelEvent> {
        match parse(line).unwrap() {
            Command::Events(events) => events,
            other => panic!("expected events, got {other:?}"),
        }
    }

    #[test]
    fn search_keeps_the_whole_query() {
        assert_eq!(
            events("search  arrow left "),
            vec![PanelEvent::Query("arrow left".into())]
        );
        assert_eq!(events("search"), vec![PanelEvent::Query(String::new())]);
    }

    #[test]
    fn shapes_with_and_without_geometry() {
        assert_eq!(
            events("shapes circle 3"),
            vec![
                PanelEvent::EditShapes(ShapeEdit::Type(ShapeType::Ellipse)),
                PanelEvent::EditShapes(ShapeEdit::Count(3)),
                PanelEvent::SubmitShapes,
            ]
        );
        let full = events("shapes frame 2 40 30 8 #ff0000");
        assert_eq!(full.len(), 7);
        assert_eq!(
            full[5],
            PanelEvent::EditShapes(ShapeEdit::Color("#ff0000".into()))
        );
        assert_eq!(full[6], PanelEvent::SubmitShapes);
    }

    #[test]
    fn errors_are_reported() {
        assert!(parse("shapes hexagon 2").is_err());
        assert!(parse("insert x").is_err());
        assert!(parse("shapes rect 2 40").is_err());
        assert!(parse("dance").is_err());
        assert_eq!(parse("help"), Ok(Command::Help));
        assert_eq!(parse("   "), Ok(Command::Events(Vec::new())));
    }
}
