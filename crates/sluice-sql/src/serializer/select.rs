use super::{projection::SelectList, Comma, Delimited, Formatter, Ident, Scope, ToSql};
use crate::ResultShape;

use sluice_core::{
    model::{
        Alias, Data, DataQuery, Direction, Distinct, Duplicates, Fetch, OrderBy, Select,
        SetOperation, SetOperationKind, Table, Top,
    },
    schema::{Column, Entity},
    Error, Result,
};

const PARTITION: &str = "__Partition__";
const DUPLICATES: &str = "__Duplicates__";
const ROW_NUMBER: &str = "__RowNumber__";

/// A derived table wrapped around the select below it. Each one filters on
/// a row number the layer below computes.
#[derive(Clone, Copy)]
enum Layer<'a> {
    /// First row of each distinct key
    Distinct(&'a [Distinct]),

    /// Every row of a key group but the first
    Duplicates(&'a Duplicates),

    /// Rows `start` onwards
    Paging,
}

/// Everything needed to render the layers of one select.
struct Layered<'s, 'a> {
    select: &'s Select,
    entity: &'a Entity,
    layers: Vec<Layer<'s>>,

    /// Alias of the derived table each layer reads from, innermost first
    aliases: Vec<Alias>,

    /// Row limit rendered as `TOP`, if not folded into paging
    top: Option<Top>,

    /// Row limit folded into the paging bounds
    take: Option<u64>,

    /// Render `ORDER BY` on the outermost layer
    ordered: bool,

    /// Select `COUNT(*)` instead of the select list
    count: bool,
}

/// An item of an `ORDER BY` list or window ordering.
enum OrderItem<'a> {
    Explicit(&'a OrderBy),
    Random,
    Key(&'a Column),
}

/// A select nested inside another statement. `ORDER BY` only survives when
/// a row limit depends on it.
impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        f.nested(|f| render(f, self, false, false))
    }
}

/// Renders the outermost select of a statement, reducing its rows as its
/// fetch asks.
pub(super) fn statement(f: &mut Formatter<'_>, select: &Select) -> Result<ResultShape> {
    match select.fetch {
        Some(Fetch::Count) => {
            if select.has_layers() || select.top.is_some() {
                fmt!(f, "SELECT COUNT(*) FROM (" select ") AS " Alias::next());
            } else {
                render(f, select, false, true)?;
            }
            Ok(ResultShape::Scalar)
        }
        Some(Fetch::Any) => {
            fmt!(f, "SELECT CASE WHEN EXISTS (" select ") THEN CAST(1 AS bit) ELSE CAST(0 AS bit) END");
            Ok(ResultShape::Scalar)
        }
        Some(fetch @ (Fetch::First | Fetch::FirstOrDefault)) => {
            if let Some(Top::Percent(_)) = select.top {
                // The first row of the percentage, not the percentage of the
                // first row
                let inner = Select {
                    fetch: None,
                    ..select.clone()
                };
                let outer = Select {
                    fetch: Some(fetch),
                    ..inner.nest()
                };
                render(f, &outer, true, false)?;
            } else {
                render(f, select, true, false)?;
            }

            Ok(match fetch {
                Fetch::First => ResultShape::Single,
                _ => ResultShape::SingleOrNone,
            })
        }
        None => {
            render(f, select, true, false)?;
            Ok(ResultShape::Multiple)
        }
    }
}

fn render(f: &mut Formatter<'_>, select: &Select, ordered: bool, count: bool) -> Result<()> {
    let entity = f.entity_of(select)?;

    let mut layers = vec![];
    if !select.distinct.is_empty() {
        layers.push(Layer::Distinct(&select.distinct));
    }
    if let Some(duplicates) = &select.duplicates {
        layers.push(Layer::Duplicates(duplicates));
    }
    if select.start > 0 {
        layers.push(Layer::Paging);
    }

    let (top, take) = match top(select) {
        Some(Top::Count(n)) if select.start > 0 => (None, Some(n)),
        top => (top, None),
    };

    let cx = Layered {
        select,
        entity,
        aliases: layers.iter().map(|_| Alias::next()).collect(),
        layers,
        top,
        take,
        ordered,
        count,
    };

    level(f, &cx, cx.layers.len())
}

/// The row limit, with a single-row fetch folded in.
fn top(select: &Select) -> Option<Top> {
    match select.fetch {
        Some(Fetch::First | Fetch::FirstOrDefault) => Some(Top::Count(
            select.top.and_then(Top::as_count).map_or(1, |n| n.min(1)),
        )),
        _ => select.top,
    }
}

/// Renders layer `i`, where `0` is the base select over the data source.
fn level<'a>(f: &mut Formatter<'a>, cx: &Layered<'_, 'a>, i: usize) -> Result<()> {
    let outermost = i == cx.layers.len();
    let select = cx.select;

    let alias = match i {
        0 => select.alias(),
        _ => Some(cx.aliases[i - 1]),
    };

    let scope = Scope {
        alias,
        entity: cx.entity,
    };

    f.scoped(scope, |f| {
        fmt!(f, "SELECT ");

        if !outermost {
            let above = cx.layers[i];
            fmt!(f, "*, ROW_NUMBER() OVER (" Window(cx, above) ") AS " Ident(above.column()));
        } else if cx.count {
            fmt!(f, "COUNT(*)");
        } else {
            fmt!(f, cx.top.map(|top| (top, " ")) SelectList(&select.projection));
        }

        fmt!(f, " FROM ");

        if i == 0 {
            let data = select
                .data
                .as_ref()
                .ok_or_else(|| Error::invalid_statement("select has no data source"))?;
            fmt!(f, data);
            where_clause(f, select)?;
        } else {
            let below = cx.layers[i - 1];
            fmt!(f, "(");
            level(f, cx, i - 1)?;
            fmt!(f, ") AS " cx.aliases[i - 1] " WHERE ");
            filter(f, cx, below)?;
        }

        // Paging fixes the rows by row number; ordering them again is left to
        // the caller.
        let paged = cx.layers.iter().any(|layer| matches!(layer, Layer::Paging));
        if outermost && !cx.count && !paged && (cx.ordered || cx.top.is_some()) {
            let order = order(select);
            if !order.is_empty() {
                fmt!(f, " ORDER BY " Comma(order));
            }
        }

        Ok(())
    })
}

/// The condition of the derived table wrapping the row numbers `layer`
/// computed.
fn filter(f: &mut Formatter<'_>, cx: &Layered<'_, '_>, layer: Layer<'_>) -> Result<()> {
    let column = Ident(layer.column());

    match layer {
        Layer::Distinct(_) => fmt!(f, column " = 1"),
        Layer::Duplicates(_) => fmt!(f, column " > 1"),
        Layer::Paging => {
            let start = cx.select.start;
            match cx.take {
                Some(take) => {
                    // An empty window when nothing is taken
                    let end = (start + take).saturating_sub(1);
                    fmt!(f, column " BETWEEN " start " AND " end);
                }
                None => fmt!(f, column " >= " start),
            }
        }
    }
    Ok(())
}

/// The `WHERE` clause of the base select: its filter and set operations.
pub(super) fn where_clause(f: &mut Formatter<'_>, select: &Select) -> Result<()> {
    if select.filter.is_none() && select.set_operations.is_empty() {
        return Ok(());
    }

    fmt!(f, " WHERE ");

    if let Some(filter) = &select.filter {
        fmt!(f, filter);
        if !select.set_operations.is_empty() {
            fmt!(f, " AND ");
        }
    }
    fmt!(f, Delimited(&select.set_operations, " AND "));
    Ok(())
}

/// The explicit ordering of a select.
fn order(select: &Select) -> Vec<OrderItem<'_>> {
    let mut order: Vec<_> = select.order_by.iter().map(OrderItem::Explicit).collect();
    if select.randomize {
        order.push(OrderItem::Random);
    }
    order
}

/// Orders `order`, falling back to the entity key.
fn or_key<'a>(mut order: Vec<OrderItem<'a>>, entity: &'a Entity) -> Result<Vec<OrderItem<'a>>> {
    if order.is_empty() {
        order = entity.key_columns().into_iter().map(OrderItem::Key).collect();
    }

    if order.is_empty() {
        return Err(Error::invalid_statement(format!(
            "entity `{}` has neither a key nor an explicit order to number rows by",
            entity.name
        )));
    }

    Ok(order)
}

impl Layer<'_> {
    fn column(self) -> &'static str {
        match self {
            Layer::Distinct(_) => PARTITION,
            Layer::Duplicates(_) => DUPLICATES,
            Layer::Paging => ROW_NUMBER,
        }
    }
}

/// The `OVER` clause numbering rows for `layer`.
struct Window<'a>(&'a Layered<'a, 'a>, Layer<'a>);

impl ToSql for Window<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let Window(cx, layer) = self;

        match layer {
            Layer::Distinct(distinct) => {
                let keys = distinct.iter().map(|distinct| &distinct.key);
                let tiebreaks = distinct
                    .iter()
                    .filter_map(|distinct| distinct.order.as_ref())
                    .map(OrderItem::Explicit)
                    .collect();
                let order = or_key(tiebreaks, cx.entity)?;
                fmt!(f, "PARTITION BY " Comma(keys) " ORDER BY " Comma(order));
            }
            Layer::Duplicates(duplicates) => {
                let tiebreaks = duplicates.order.iter().map(OrderItem::Explicit).collect();
                let order = or_key(tiebreaks, cx.entity)?;
                let key = &duplicates.key;
                fmt!(f, "PARTITION BY " key " ORDER BY " Comma(order));
            }
            Layer::Paging => {
                let order = or_key(order(cx.select), cx.entity)?;
                fmt!(f, "ORDER BY " Comma(order));
            }
        }
        Ok(())
    }
}

impl ToSql for OrderItem<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            OrderItem::Explicit(order_by) => {
                let projection = &order_by.projection;
                fmt!(f, projection);
                if order_by.direction == Direction::Desc {
                    fmt!(f, " DESC");
                }
            }
            OrderItem::Random => fmt!(f, "NEWID()"),
            OrderItem::Key(column) => fmt!(f, Ident(&column.name)),
        }
        Ok(())
    }
}

impl ToSql for Top {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            Top::Count(n) => fmt!(f, "TOP (" n ")"),
            Top::Percent(percent) => {
                let percent = percent.to_string();
                fmt!(f, "TOP (" percent.as_str() ") PERCENT");
            }
        }
        Ok(())
    }
}

impl ToSql for &Data {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            Data::Table(table) => fmt!(f, table),
            Data::Query(query) => fmt!(f, query),
        }
        Ok(())
    }
}

impl ToSql for &Table {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, Ident(&self.name) " " self.alias);
        Ok(())
    }
}

impl ToSql for &DataQuery {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, "(");
        if self.is_union() {
            // Branches are stored newest first
            let branches = self.selects.iter().rev().map(Branch);
            fmt!(f, Delimited(branches, " UNION "));
        } else {
            fmt!(f, Delimited(&self.selects, ""));
        }
        fmt!(f, ") AS " self.alias);
        Ok(())
    }
}

/// One branch of a union. A branch with its own row limit or layers is
/// wrapped so the limit applies to the branch alone.
struct Branch<'a>(&'a Select);

impl ToSql for Branch<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let select = self.0;

        if select.top.is_some() || select.has_layers() || select.fetch.is_some() {
            fmt!(f, "SELECT * FROM (" select ") AS " Alias::next());
        } else {
            fmt!(f, select);
        }
        Ok(())
    }
}

impl ToSql for &SetOperation {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let exists = match self.kind {
            SetOperationKind::Intersect => "EXISTS (",
            SetOperationKind::Compliment => "NOT EXISTS (",
        };
        let select = &self.select;
        fmt!(f, exists select ")");
        Ok(())
    }
}
