use crate::cli::SearchArgs;
use crate::recorder_for;
use bindsql::search::{Page, SortField, UserSearch};
use bindsql::{Sql, record_sql};

pub fn run(args: SearchArgs) -> anyhow::Result<()> {
    let q = build(&args);
    let recorder = recorder_for(args.output.format.unwrap_or_default());
    record_sql(&recorder, &q)?;
    Ok(())
}

fn build(args: &SearchArgs) -> Sql {
    let mut search = UserSearch::new(args.name.clone(), args.ids.clone())
        .style(args.output.style.unwrap_or_default());

    if let Some(requested) = args.sort.as_deref() {
        if SortField::parse(requested).is_none() {
            tracing::warn!(requested, "sort field not allowed, using name");
        }
        search = search.sort(SortField::parse_or_first(requested));
    }
    if let Some(limit) = args.limit {
        search = search.page(Page::new(args.offset.unwrap_or(0), limit));
    }

    search.build()
}
