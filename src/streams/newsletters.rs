use super::{campaign_ref, href, ACTIVITIES_FIELD};
use crate::context::ContextProjection;
use crate::decode::RecordShape;
use crate::error::Result;
use crate::schema::{Field, FieldType};
use crate::stream::{StreamDescriptor, StreamRegistry};

fn from_field_ref() -> Vec<Field> {
    vec![
        Field::string("fromFieldId")
            .required()
            .describe("The 'From' address ID"),
        href(),
    ]
}

fn send_metrics() -> Field {
    Field::object(
        "sendMetrics",
        [
            Field::string("status").allowed(["scheduled", "in_progress", "finished"]),
            Field::string("sent").describe("Messages already sent"),
            Field::string("total").describe("The total amount of messages to send"),
        ],
    )
    .describe("The sending metrics")
}

pub(super) fn register(registry: &mut StreamRegistry) -> Result<()> {
    let newsletters = registry.register(
        StreamDescriptor::builder("newsletters", "/newsletters")
            .description("Get the list of newsletters")
            .primary_key("newsletterId")
            .child_context(ContextProjection::key("newsletterId"))
            .fields([
                Field::string("newsletterId")
                    .required()
                    .describe("The newsletter ID"),
                href().required(),
                Field::string("name").describe("The newsletter name"),
                Field::string("type").describe("The newsletter type"),
                Field::string("status").describe("The newsletter status"),
                Field::string("editor")
                    .describe("This describes how the content of the message was created"),
                Field::string("subject").describe("The message subject"),
                Field::object("campaign", campaign_ref())
                    .describe("The newsletter must be assigned to a campaign"),
                Field::datetime("sendOn").describe(
                    "The scheduled send date and time for the newsletter in the ISO 8601 format",
                ),
                Field::datetime("createdOn").describe("The creation date"),
                send_metrics(),
                Field::string("flags").describe(
                    "Comma-separated list of message flags. The possible values are: openrate, clicktrack, and google_analytics.",
                ),
            ])
            .build()?,
    )?;

    registry.register(
        StreamDescriptor::builder("newsletter_details", "/newsletters/{newsletterId}")
            .description("Get a single newsletter by its ID")
            .parent(&newsletters)
            .shape(RecordShape::Object)
            .inject_context()
            .primary_key("newsletterId")
            .fields([
                Field::string("newsletterId")
                    .required()
                    .describe("The newsletter ID"),
                href(),
                Field::string("name").describe("The newsletter name"),
                Field::string("type")
                    .describe("The newsletter type")
                    .allowed(["broadcast", "draft"]),
                Field::string("status")
                    .describe("The newsletter status")
                    .allowed(["enabled", "disabled"]),
                Field::string("editor")
                    .describe("This describes how the content of the message was created"),
                Field::string("subject").describe("The message subject"),
                Field::object("fromField", from_field_ref())
                    .describe("The 'From' email address used for the message"),
                Field::object("replyTo", from_field_ref())
                    .describe("The email that will be used as the reply-to address"),
                Field::object("campaign", campaign_ref())
                    .describe("The newsletter must be assigned to a campaign"),
                Field::datetime("createdOn").describe("The creation date"),
                Field::datetime("sendOn").describe(
                    "The scheduled send date and time for the newsletter in the ISO 8601 format.",
                ),
                Field::object(
                    "content",
                    [
                        Field::string("html").describe("The message content in HTML"),
                        Field::string("plain")
                            .describe("The plain text equivalent of the message content"),
                    ],
                )
                .describe("The message content."),
                Field::array(
                    "attachments",
                    FieldType::object([
                        Field::string("fileName").describe("The file name"),
                        Field::string("content").describe("The base64 encoded file content"),
                        Field::string("mimeType").describe("The file mime type"),
                    ]),
                )
                .describe(
                    "The newsletter attachments. The size of all attachments combined can't exceed 400KB",
                ),
                Field::array(
                    "clickTracks",
                    FieldType::object([
                        Field::string("clickTrackId"),
                        Field::uri("url").describe("The tracked link"),
                        Field::string("name").describe("The tracked link name"),
                    ]),
                )
                .describe("The list of tracked links"),
                send_metrics(),
            ])
            .build()?,
    )?;

    // Only the last 14 days of activity are returned by default.
    registry.register(
        StreamDescriptor::builder("newsletter_activities", "/newsletters/{newsletterId}/activities")
            .description("Get newsletter activities")
            .parent(&newsletters)
            .shape(RecordShape::wrapped(ACTIVITIES_FIELD))
            .inject_context()
            .fields([
                Field::string("activity")
                    .describe("The type of activity")
                    .allowed(["send", "open", "click"]),
                Field::datetime("createdOn").describe("The date when activity occurred"),
                Field::object(
                    "contact",
                    [
                        Field::string("contactId").describe("The contact ID"),
                        href(),
                    ],
                ),
            ])
            .build()?,
    )?;

    Ok(())
}
