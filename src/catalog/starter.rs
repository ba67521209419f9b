/// Catalog written by `starpass init` when none exists yet.
/// Need ids are left empty: fill them in from the volunteer platform.
pub const STARTER_CATALOG: &str = r#"# Star Pass template catalog.
#
# Keywords are matched against calendar event titles. When two keywords
# score the same, the one listed first wins, so list specific keywords
# ("dh: game 1") before generic ones ("game").
calendars:
  practice:
    calendar_id: ""
    queries: ["scrimmage", "officials"]
    templates:
      "officials practice":
        description: Officials practice
        group: null
        initiative: Officiating
        type: practice
        need_ids:
          - id: ""
            description: NSOs
            slots: 6
            max_length: 120
            offset_start: 0
            offset_end: 0
      "scrimmage":
        description: Home team scrimmage
        group: adults
        initiative: Home Teams
        type: scrimmage
        need_ids:
          - id: ""
            description: NSOs
            slots: 10
            max_length: 165
            offset_start: -15
            offset_end: 15
          - id: ""
            description: Skating officials
            slots: 7
            max_length: null
            offset_start: -30
            offset_end: 0
      "default":
        description: Unmatched event
        group: null
        initiative: Unassigned
        type: practice
        need_ids:
          - id: ""
            description: Volunteers
            slots: 1
            max_length: null
            offset_start: 0
            offset_end: 0
"#;
