use linctl::client::{
    classify, classify_message, ClientError, Entity, ErrorKind, GraphQlError, TransportError,
    ValidationError,
};
use speculate2::speculate;

fn graphql(message: &str) -> TransportError {
    TransportError::GraphQl(vec![GraphQlError {
        message: message.to_string(),
        extensions: None,
    }])
}

speculate! {
    describe "classify_message" {
        it "recognises project not found phrasings" {
            assert_eq!(
                classify_message("GraphQL errors: [{message: 'Project not found'}]"),
                ErrorKind::NotFound(Entity::Project)
            );
            assert_eq!(classify_message("projectId XYZ not found"), ErrorKind::NotFound(Entity::Project));
            assert_eq!(classify_message("Entity not found: Project"), ErrorKind::NotFound(Entity::Project));
        }

        it "scopes not found to the entity named" {
            let kind = classify_message("issue not found");
            assert_ne!(kind, ErrorKind::NotFound(Entity::Project));
            assert_eq!(kind, ErrorKind::NotFound(Entity::Issue));
        }

        it "prefers milestones over projects" {
            assert_eq!(
                classify_message("Project milestone not found"),
                ErrorKind::NotFound(Entity::Milestone)
            );
            assert_eq!(
                classify_message("projectMilestoneId abc not found"),
                ErrorKind::NotFound(Entity::Milestone)
            );
            assert_eq!(
                classify_message("Entity not found: ProjectMilestone"),
                ErrorKind::NotFound(Entity::Milestone)
            );
        }

        it "prefers an exact entity phrase over an id field mention" {
            assert_eq!(
                classify_message("Issue not found: projectId abc"),
                ErrorKind::NotFound(Entity::Issue)
            );
            assert_eq!(
                classify_message("Team not found for issueId ENG-1"),
                ErrorKind::NotFound(Entity::Team)
            );
        }

        it "recognises teams and users" {
            assert_eq!(classify_message("Team not found"), ErrorKind::NotFound(Entity::Team));
            assert_eq!(classify_message("leadId u-9 not found"), ErrorKind::NotFound(Entity::User));
        }

        it "recognises authentication failures" {
            assert_eq!(classify_message("Authentication required, not authenticated"), ErrorKind::AuthFailure);
            assert_eq!(classify_message("Invalid API key"), ErrorKind::AuthFailure);
        }

        it "recognises server validation" {
            assert_eq!(classify_message("Argument Validation Error"), ErrorKind::Validation);
        }

        it "leaves unknown messages unclassified" {
            assert_eq!(classify_message("Something exploded"), ErrorKind::Unclassified);
        }
    }

    describe "classify" {
        it "maps 401 and 403 to auth failures" {
            let err = TransportError::Status { status: 401, body: "nope".into() };
            assert_eq!(classify(&err), Some(ErrorKind::AuthFailure));
            let err = TransportError::Status { status: 403, body: String::new() };
            assert_eq!(classify(&err), Some(ErrorKind::AuthFailure));
        }

        it "classifies envelope errors by message" {
            assert_eq!(classify(&graphql("Project not found")), Some(ErrorKind::NotFound(Entity::Project)));
        }

        it "does not classify transport failures" {
            assert_eq!(classify(&TransportError::Timeout), None);
            assert_eq!(classify(&TransportError::Decode("eof".into())), None);
        }
    }

    describe "client errors" {
        it "keeps the remote message next to the kind" {
            let err = ClientError::from(graphql("Project not found"));
            assert!(err.is_not_found(Entity::Project));
            assert!(err.to_string().contains("Project not found"));
        }

        it "passes unclassified messages through whole" {
            let err = ClientError::from(graphql("Rate limit exceeded for key abc"));
            assert_eq!(err.kind(), Some(ErrorKind::Unclassified));
            assert!(matches!(err, ClientError::Remote(ref m) if m.contains("Rate limit exceeded for key abc")));
        }

        it "has no kind for transport failures" {
            let err = ClientError::from(TransportError::Timeout);
            assert_eq!(err.kind(), None);
            assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
        }

        it "reports local validation as validation" {
            let err = ClientError::from(ValidationError::NothingToUpdate);
            assert_eq!(err.kind(), Some(ErrorKind::Validation));
        }
    }
}
