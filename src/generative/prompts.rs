//! Prompt templates

use crate::models::TripRequest;

const TRANSPORT_TEMPLATE: &str = r#"Generate realistic transportation options from {source} to {destination}.

Focus especially on accurate details based on the specific source and destination:
- For flights: Only include if the route would realistically have flights (e.g., yes for Kolkata to Mumbai, no for Kolkata to Darjeeling)
- For trains: Include train numbers, train names, coach classes, station names
- For buses: Include bus operator names, bus types (sleeper, AC, non-AC), boarding points, drop-off points
- For all options: Include multiple departure times throughout day if available
- Include accurate frequency information (daily, weekdays only, etc)
- All prices should be in Indian Rupees (₹) format, not dollars
- Be accurate and realistic about route possibilities

Return ONLY valid JSON with this structure (no explanation text, just the JSON):
{
  "flights": [
    {"name": "Airline Name", "departure": "10:00 AM", "arrival": "12:30 PM", "duration": "2h 30m", "price": "₹5,000-7,500", "info": "Daily flights, Economy class"}
  ],
  "trains": [
    {"name": "12345 Express", "departure": "9:00 AM", "arrival": "11:30 AM", "duration": "2h 30m", "price": "₹1,500-2,500", "info": "Daily service, 2AC/3AC/Sleeper classes available, Departs from Central Station"}
  ],
  "buses": [
    {"name": "Deluxe Express", "departure": "8:00 AM", "arrival": "11:00 AM", "duration": "3h", "price": "₹800-1,200", "info": "AC Volvo, Daily, Boarding at Main Bus Terminal"}
  ]
}

If a transportation mode is not available, use an empty array like: "flights": []

Be realistic about routes - if the distance is too short for flights or too far for buses, reflect that in your response.
Also, know that flights DO exist between major cities like Kolkata and Mumbai, Delhi and Bangalore, etc.
For routes like Kolkata to Darjeeling, suggest flights to the nearest airport (like Bagdogra) if applicable."#;

const TRIP_TEMPLATE: &str = "Generate Travel Plan for Location: {location}, for {totalDays} Days for {traveler} with a {budget} budget. Give me a Hotels options list with Hotel Name, Hotel address, Price, hotel image url, geo coordinates, rating, descriptions and suggest itinerary with place Name, Place Details, Place Image Url, Geo Coordinates, ticket Pricing, rating, Time travel each of the location for {totalDays} days with each day plan with best time to visit in JSON format.";

/// Prompt asking for flights, trains and buses between two places
#[must_use]
pub fn transport_prompt(source: &str, destination: &str) -> String {
    TRANSPORT_TEMPLATE
        .replace("{source}", source.trim())
        .replace("{destination}", destination.trim())
}

/// Prompt asking for hotels and a day-by-day itinerary
#[must_use]
pub fn trip_prompt(request: &TripRequest) -> String {
    TRIP_TEMPLATE
        .replace("{location}", request.location.trim())
        .replace("{totalDays}", &request.total_days.to_string())
        .replace("{traveler}", &request.traveler.to_string())
        .replace("{budget}", &request.budget.to_string())
}
