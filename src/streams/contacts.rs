use super::{campaign_ref, href, ACTIVITIES_FIELD};
use crate::context::ContextProjection;
use crate::decode::RecordShape;
use crate::error::Result;
use crate::schema::{Field, FieldType};
use crate::stream::{StreamDescriptor, StreamRegistry};
use serde_json::{json, Value};

const ENGAGEMENT_SCORE: &str = "Engagement Score is a feature that presents a visual estimate \
of a contact's engagement with mailings. The score is based on the contact's interactions with \
your e-mails. Via API, it's returned in the form of numbers ranging from 1 (Not Engaged) to 5 \
(Highly Engaged).";

const SCORING: &str = "Contact scoring, pass null to remove the score from a contact";

pub(super) fn register(registry: &mut StreamRegistry) -> Result<()> {
    let contacts = registry.register(
        StreamDescriptor::builder("contacts", "/contacts")
            .description("Get a list of contacts")
            .primary_key("contactId")
            .child_context(ContextProjection::key("contactId"))
            .fields([
                Field::string("contactId").required(),
                Field::string("name").describe("Contact's name"),
                Field::string("origin"),
                Field::string("timeZone").describe(
                    "The time zone of a contact, uses the time zone database format (https://www.iana.org/time-zones)",
                ),
                Field::uri("activities").describe("Contact's activities"),
                Field::datetime("changedOn"),
                Field::datetime("createdOn"),
                Field::object(
                    "campaign",
                    [
                        Field::string("campaignId").required(),
                        Field::string("href"),
                        Field::string("name"),
                    ],
                ),
                Field::string("email").required(),
                Field::number("scoring").describe(SCORING),
                Field::integer("engagementScore").describe(ENGAGEMENT_SCORE),
                Field::string("href").required(),
            ])
            .build()?,
    )?;

    registry.register(
        StreamDescriptor::builder("contact_details", "/contacts/{contactId}")
            .description("Get contact details by contact ID")
            .parent(&contacts)
            .shape(RecordShape::Object)
            .inject_context()
            .primary_key("contactId")
            .fields([
                Field::string("contactId").required(),
                Field::string("name"),
                Field::string("origin"),
                Field::string("timeZone")
                    .describe("The time zone of a contact, uses the time zone database format"),
                Field::uri("activities"),
                Field::datetime("changedOn"),
                Field::datetime("createdOn"),
                Field::object("campaign", campaign_ref()),
                Field::email("email"),
                Field::number("scoring").describe(SCORING),
                Field::integer("engagementScore")
                    .allowed([Value::Null, json!(1), json!(2), json!(3), json!(4), json!(5)])
                    .describe(ENGAGEMENT_SCORE),
                href().required(),
                Field::string("note"),
                Field::string("ipAddress")
                    .describe("The contact's IP address. IPv4 and IPv6 formats are accepted."),
                Field::object(
                    "geolocation",
                    [
                        Field::string("latitude"),
                        Field::string("longitude"),
                        Field::string("continentCode")
                            .allowed(["", "OC", "AN", "SA", "NA", "AS", "EU", "AF"]),
                        Field::string("countryCode")
                            .describe("The country code, compliant with ISO 3166-1 alpha-2"),
                        Field::string("region"),
                        Field::string("postalCode"),
                        Field::string("city"),
                    ],
                ),
                Field::array(
                    "customFieldValues",
                    FieldType::object([
                        Field::string("customFieldId").required(),
                        Field::string("name").required(),
                        Field::string("type"),
                        Field::array("value", FieldType::String),
                        Field::array("values", FieldType::String),
                    ]),
                )
                .describe("The list of custom field values"),
            ])
            .build()?,
    )?;

    // Only the last 14 days of activity are returned by default.
    registry.register(
        StreamDescriptor::builder("contact_activities", "/contacts/{contactId}/activities")
            .description("Get a list of contact activities")
            .parent(&contacts)
            .shape(RecordShape::wrapped(ACTIVITIES_FIELD))
            .primary_key("contactId")
            .inject_context()
            .fields([
                Field::string("contactId").required(),
                Field::string("activity")
                    .describe("The type of activity")
                    .allowed(["send", "open", "click"]),
                Field::string("subject"),
                Field::datetime("createdOn").describe("The activity date"),
                Field::uri("previewUrl").describe(
                    "This is only available for the send activity. It includes a link to the message preview",
                ),
                Field::object(
                    "resource",
                    [
                        Field::string("resourceId"),
                        Field::string("resourceType").allowed([
                            Value::Null,
                            json!("newsletters"),
                            json!("splittests"),
                            json!("autoresponders"),
                            json!("rss-newsletters"),
                            json!("sms"),
                        ]),
                        href(),
                    ],
                ),
                Field::object(
                    "clickTrack",
                    [
                        Field::string("id").describe("The click tracking ID"),
                        Field::string("name").describe("The name of the clicked link"),
                        Field::uri("url").describe("The URL of the clicked link"),
                    ],
                ),
            ])
            .build()?,
    )?;

    Ok(())
}
