use chrono::{TimeZone, Utc};
use linctl::client::input::*;
use linctl::client::ValidationError;
use linctl::models::*;
use serde_json::{json, Map, Value};
use speculate2::speculate;

const VALID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn written(field: Field<String>) -> Map<String, Value> {
    let mut input = Map::new();
    field.write(&mut input, "projectId");
    input
}

speculate! {
    describe "is_valid_uuid" {
        it "accepts lowercase and uppercase hyphenated UUIDs" {
            assert!(is_valid_uuid(VALID));
            assert!(is_valid_uuid(&VALID.to_uppercase()));
        }

        it "rejects everything else" {
            assert!(!is_valid_uuid(""));
            assert!(!is_valid_uuid("unassigned"));
            assert!(!is_valid_uuid(&format!("{}-extra", VALID)));
            assert!(!is_valid_uuid(&VALID.replace('-', "")));
            assert!(!is_valid_uuid("{123e4567-e89b-12d3-a456-426614174000}"));
            assert!(!is_valid_uuid("123e4567-e89b-12d3-a456-42661417400g"));
        }
    }

    describe "build_project_reference" {
        it "omits the field for an empty value" {
            let field = build_project_reference("").unwrap();
            assert_eq!(field, Field::Unspecified);
            assert!(!field.is_present());
            assert!(written(field).is_empty());
        }

        it "clears the field for unassigned" {
            let field = build_project_reference("unassigned").unwrap();
            assert_eq!(field, Field::Cleared);
            assert!(field.is_present());
            assert_eq!(written(field).get("projectId"), Some(&Value::Null));
        }

        it "matches the sentinel case-insensitively" {
            assert_eq!(build_project_reference("Unassigned").unwrap(), Field::Cleared);
        }

        it "sets the field for a UUID" {
            let field = build_project_reference(VALID).unwrap();
            assert_eq!(field.value().map(String::as_str), Some(VALID));
            assert_eq!(written(field).get("projectId"), Some(&json!(VALID)));
        }

        it "rejects anything else and names the value" {
            let err = build_project_reference("not-a-uuid").unwrap_err();
            assert_eq!(
                err,
                ValidationError::MalformedId { field: "projectId", value: "not-a-uuid".to_string() }
            );
            assert!(err.to_string().contains("not-a-uuid"));
        }
    }

    describe "user_reference" {
        it "distinguishes absent from cleared and set" {
            assert_eq!(user_reference(None), Field::Unspecified);
            assert_eq!(user_reference(Some("")), Field::Cleared);
            assert_eq!(user_reference(Some("none")), Field::Cleared);
            assert_eq!(user_reference(Some("unassigned")), Field::Cleared);
            assert_eq!(user_reference(Some("me")), Field::Set("me".to_string()));
        }
    }

    describe "validate_date" {
        it "accepts empty and real calendar dates" {
            assert!(validate_date("", "target_date").is_ok());
            assert!(validate_date("2024-12-31", "target_date").is_ok());
            assert!(validate_date("2024-02-29", "target_date").is_ok());
        }

        it "rejects other shapes and impossible dates" {
            for raw in ["31-12-2024", "2024-13-01", "2023-02-29", "2024-1-05", "2024/12/31", "tomorrow"] {
                assert!(
                    matches!(validate_date(raw, "target_date"), Err(ValidationError::MalformedDate { .. })),
                    "{} should be rejected",
                    raw
                );
            }
        }

        it "treats an empty optional date as a clear" {
            assert_eq!(date_field(Some(""), "target_date").unwrap(), Field::Cleared);
            assert_eq!(date_field(None, "target_date").unwrap(), Field::Unspecified);
        }
    }

    describe "validate_enum" {
        it "returns the canonical spelling" {
            assert_eq!(validate_enum("PLANNED", &ProjectState::ALL, "state").unwrap(), "planned");
            assert_eq!(validate_enum("ontrack", &ProjectHealth::ALL, "health").unwrap(), "onTrack");
        }

        it "lists the allowed values on failure" {
            let err = validate_enum("done", &ProjectState::ALL, "state").unwrap_err();
            let message = err.to_string();
            assert!(message.contains("done"));
            assert!(message.contains("planned, started, paused, completed, canceled"));
        }

        it "parses states into the typed enum" {
            assert_eq!(parse_state("Started").unwrap(), ProjectState::Started);
            assert_eq!(parse_health("AtRisk").unwrap(), ProjectHealth::AtRisk);
        }
    }

    describe "validate_priority" {
        it "accepts 0 through 4 only" {
            assert_eq!(validate_priority(0).unwrap(), 0);
            assert_eq!(validate_priority(4).unwrap(), 4);
            assert!(matches!(validate_priority(5), Err(ValidationError::OutOfRange { .. })));
            assert!(matches!(validate_priority(-1), Err(ValidationError::OutOfRange { .. })));
        }
    }

    describe "parse_time_expression" {
        before {
            let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        }

        it "has no bound for all_time or empty" {
            assert_eq!(parse_time_expression("all_time", now).unwrap(), None);
            assert_eq!(parse_time_expression("", now).unwrap(), None);
        }

        it "subtracts relative spans" {
            assert_eq!(
                parse_time_expression("6_months_ago", now).unwrap().as_deref(),
                Some("2023-12-15T12:00:00+00:00")
            );
            assert_eq!(
                parse_time_expression("2_weeks_ago", now).unwrap().as_deref(),
                Some("2024-06-01T12:00:00+00:00")
            );
            assert_eq!(
                parse_time_expression("1_year_ago", now).unwrap().as_deref(),
                Some("2023-06-15T12:00:00+00:00")
            );
            assert_eq!(
                parse_time_expression("1_day_ago", now).unwrap().as_deref(),
                Some("2024-06-14T12:00:00+00:00")
            );
        }

        it "anchors absolute dates at midnight UTC" {
            assert_eq!(
                parse_time_expression("2024-01-01", now).unwrap().as_deref(),
                Some("2024-01-01T00:00:00+00:00")
            );
        }

        it "accepts singular and plural units" {
            assert_eq!(
                parse_time_expression("3_days_ago", now).unwrap(),
                parse_time_expression("3_day_ago", now).unwrap()
            );
        }

        it "rejects unknown expressions" {
            for raw in ["yesterday", "3_fortnights_ago", "x_days_ago", "6_months", "3_dayssss_ago", "2_weekss_ago"] {
                assert!(parse_time_expression(raw, now).is_err(), "{} should be rejected", raw);
            }
        }
    }

    describe "project_create_draft" {
        it "requires a name and a team" {
            let err = project_create_draft(&NewProject { teams: vec!["ENG".into()], ..Default::default() }).unwrap_err();
            assert_eq!(err, ValidationError::Missing { field: "name" });

            let err = project_create_draft(&NewProject { name: "Alpha".into(), ..Default::default() }).unwrap_err();
            assert_eq!(err, ValidationError::Missing { field: "team" });
        }

        it "normalises state and keeps dates" {
            let draft = project_create_draft(&NewProject {
                name: "Alpha".into(),
                teams: vec!["ENG".into()],
                state: Some("Planned".into()),
                target_date: Some("2024-12-31".into()),
                ..Default::default()
            })
            .unwrap();

            assert_eq!(draft.input.get("state"), Some(&json!("planned")));
            assert_eq!(draft.input.get("targetDate"), Some(&json!("2024-12-31")));
            assert!(!draft.input.contains_key("startDate"));
            assert_eq!(draft.teams, vec!["ENG".to_string()]);
        }
    }

    describe "project_update_draft" {
        it "rejects an update with nothing in it" {
            assert_eq!(
                project_update_draft(&ProjectChanges::default()).unwrap_err(),
                ValidationError::NothingToUpdate
            );
        }

        it "sends null for a cleared date" {
            let draft = project_update_draft(&ProjectChanges {
                target_date: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
            assert_eq!(draft.input.get("targetDate"), Some(&Value::Null));
        }

        it "accepts a lead change alone" {
            let draft = project_update_draft(&ProjectChanges {
                lead: Some("none".into()),
                ..Default::default()
            })
            .unwrap();
            assert!(draft.input.is_empty());
            assert_eq!(draft.lead, Field::Cleared);
        }
    }

    describe "project_list_draft" {
        before {
            let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        }

        it "hides completed and canceled projects by default" {
            let draft = project_list_draft(&ProjectFilter::default(), now).unwrap();
            assert_eq!(draft.filter.get("state"), Some(&json!({"nin": ["completed", "canceled"]})));
            assert_eq!(draft.first, 50);
            assert_eq!(draft.order_by, None);
        }

        it "filters on an explicit state" {
            let filter = ProjectFilter { state: Some("PAUSED".into()), ..Default::default() };
            let draft = project_list_draft(&filter, now).unwrap();
            assert_eq!(draft.filter.get("state"), Some(&json!({"eq": "paused"})));
        }

        it "adds a creation bound and ordering" {
            let filter = ProjectFilter {
                include_completed: true,
                newer_than: Some("2024-01-01".into()),
                sort: Some("updated".into()),
                ..Default::default()
            };
            let draft = project_list_draft(&filter, now).unwrap();
            assert!(!draft.filter.contains_key("state"));
            assert_eq!(draft.filter.get("createdAt"), Some(&json!({"gte": "2024-01-01T00:00:00+00:00"})));
            assert_eq!(draft.order_by, Some("updatedAt"));
        }

        it "rejects bad sort keys and limits" {
            let filter = ProjectFilter { sort: Some("name".into()), ..Default::default() };
            assert!(matches!(project_list_draft(&filter, now), Err(ValidationError::NotAllowed { field: "sort", .. })));

            let filter = ProjectFilter { limit: 0, ..Default::default() };
            assert!(matches!(project_list_draft(&filter, now), Err(ValidationError::OutOfRange { field: "limit", .. })));
        }
    }

    describe "milestone inputs" {
        it "requires a project UUID on create" {
            let err = milestone_create_input(&NewMilestone {
                project: "alpha".into(),
                name: "Beta".into(),
                ..Default::default()
            })
            .unwrap_err();
            assert!(matches!(err, ValidationError::MalformedId { field: "project", .. }));
        }

        it "builds the create input" {
            let input = milestone_create_input(&NewMilestone {
                project: VALID.into(),
                name: "Beta".into(),
                description: Some("First cut".into()),
                target_date: Some("2025-03-01".into()),
            })
            .unwrap();
            assert_eq!(
                Value::Object(input),
                json!({"projectId": VALID, "name": "Beta", "description": "First cut", "targetDate": "2025-03-01"})
            );
        }

        it "rejects an empty update" {
            assert_eq!(
                milestone_update_input(&MilestoneChanges::default()).unwrap_err(),
                ValidationError::NothingToUpdate
            );
        }
    }

    describe "issue inputs" {
        it "accepts identifiers and UUIDs as issue ids" {
            assert_eq!(validate_issue_id("ENG-42").unwrap(), "ENG-42");
            assert_eq!(validate_issue_id(VALID).unwrap(), VALID);
            assert!(validate_issue_id("ENG 42").is_err());
            assert!(validate_issue_id("-42").is_err());
        }

        it "omits an unassigned project on create" {
            let draft = issue_create_draft(&NewIssue {
                title: "Fix login".into(),
                team: "ENG".into(),
                project: "unassigned".into(),
                ..Default::default()
            })
            .unwrap();
            assert!(!draft.input.contains_key("projectId"));
        }

        it "passes the project tri-state through on update" {
            let draft = issue_update_draft(&IssueChanges { project: "unassigned".into(), ..Default::default() }).unwrap();
            assert_eq!(draft.input.get("projectId"), Some(&Value::Null));
        }

        it "filters unassigned issues and unassigned projects" {
            let draft = issue_list_draft(&IssueFilter {
                assignee: Some("unassigned".into()),
                project: "unassigned".into(),
                ..Default::default()
            })
            .unwrap();
            assert_eq!(draft.filter.get("assignee"), Some(&json!({"null": true})));
            assert_eq!(draft.filter.get("project"), Some(&json!({"null": true})));
        }
    }

    describe "project_update_post_input" {
        it "requires a body and canonicalises health" {
            let err = project_update_post_input(VALID, &NewProjectUpdate::default()).unwrap_err();
            assert_eq!(err, ValidationError::Missing { field: "body" });

            let input = project_update_post_input(VALID, &NewProjectUpdate {
                body: "On schedule".into(),
                health: Some("ONTRACK".into()),
            })
            .unwrap();
            assert_eq!(input.get("health"), Some(&json!("onTrack")));
        }
    }
}
